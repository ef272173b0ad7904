use proptest::prelude::*;
use snapguess::anagram::{generate_anagram, normalize_title, shuffle_string};
use snapguess::crop::{generate_crop_positions, CROP_COORDINATE_RANGE};
use snapguess::score::{calculate_score, difficulty_zoom_bonus};
use snapguess::sequencer::{shuffle, RngSource};
use snapguess::signing::{generate_signature, verify_signature};

fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut v = items.to_vec();
    v.sort();
    v
}

proptest! {
    #[test]
    fn shuffle_preserves_multiset(items in prop::collection::vec(any::<u8>(), 0..64), seed in any::<u64>()) {
        let shuffled = shuffle(&items, &mut RngSource::seeded(seed)).unwrap();
        prop_assert_eq!(shuffled.len(), items.len());
        prop_assert_eq!(sorted(&shuffled), sorted(&items));
        if items.len() <= 1 {
            prop_assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn anagram_preserves_normalized_letters(title in "\\PC{0,40}", seed in any::<u64>()) {
        let anagram = generate_anagram(&title, &mut RngSource::seeded(seed)).unwrap();
        let tiles: Vec<char> = anagram.chars().filter(|c| *c != ' ').collect();
        let normalized: Vec<char> = normalize_title(&title).chars().collect();
        prop_assert_eq!(sorted(&tiles), sorted(&normalized));
        if normalized.len() > 1 {
            prop_assert!(anagram.contains(' '));
            prop_assert_eq!(anagram.len(), normalized.len() * 2 - 1);
        }
    }

    #[test]
    fn shuffle_string_preserves_characters(s in "\\PC{0,40}", seed in any::<u64>()) {
        let shuffled = shuffle_string(&s, &mut RngSource::seeded(seed)).unwrap();
        let a: Vec<char> = s.chars().collect();
        let b: Vec<char> = shuffled.chars().collect();
        prop_assert_eq!(sorted(&a), sorted(&b));
    }

    #[test]
    fn crop_positions_in_range(count in 0usize..20, seed in any::<u64>()) {
        let positions = generate_crop_positions(count, &mut RngSource::seeded(seed)).unwrap();
        prop_assert_eq!(positions.len(), count);
        for p in positions {
            prop_assert!(p.x < CROP_COORDINATE_RANGE && p.y < CROP_COORDINATE_RANGE);
        }
    }

    #[test]
    fn score_bounded(guesses in any::<u32>()) {
        let score = calculate_score(guesses);
        prop_assert!(score <= 5);
        if guesses == 0 || guesses > 5 {
            prop_assert_eq!(score, 0);
        }
    }

    #[test]
    fn zoom_bonus_monotonic(level in 0u32..1_000_000) {
        prop_assert!(difficulty_zoom_bonus(level + 1) >= difficulty_zoom_bonus(level));
        prop_assert_eq!(difficulty_zoom_bonus(level) % 10, 0);
    }

    #[test]
    fn signature_round_trip(score in any::<u64>(), secret in "[!-~][ -~]{0,31}") {
        let sig = generate_signature(score, &secret).unwrap();
        prop_assert!(verify_signature(score, &sig, Some(&secret)));
        prop_assert!(!verify_signature(score.wrapping_add(1), &sig, Some(&secret)));
        prop_assert!(!verify_signature(score, &sig, None));
    }

    #[test]
    fn signature_single_char_change_fails(score in any::<u64>(), index in 0usize..64) {
        let sig = generate_signature(score, "shared").unwrap();
        let original = sig.as_bytes()[index];
        let replacement = if original == b'0' { b'1' } else { b'0' };
        let mut tampered = sig.into_bytes();
        tampered[index] = replacement;
        let tampered = String::from_utf8(tampered).unwrap();
        prop_assert!(!verify_signature(score, &tampered, Some("shared")));
    }

    #[test]
    fn signature_changed_secret_fails(score in any::<u64>(), secret in "[a-z]{1,16}") {
        let sig = generate_signature(score, &secret).unwrap();
        let other = format!("{secret}x");
        prop_assert!(!verify_signature(score, &sig, Some(&other)));
    }
}
