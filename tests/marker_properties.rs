// tests/marker_properties.rs

use proptest::prelude::*;

use distfix::fixup::{strip_marker, ESMODULE_MARKER};

// Chunks never contain an uppercase `O`, so the marker can neither appear
// inside a chunk nor be formed across a chunk boundary.
fn chunk() -> impl Strategy<Value = String> {
    "[a-z0-9 ;(){}=.,\"'\n\té✓]{0,24}"
}

proptest! {
    #[test]
    fn every_inserted_marker_is_removed(
        chunks in proptest::collection::vec(chunk(), 1..8),
        markers_between in proptest::collection::vec(0usize..3, 8),
    ) {
        let mut input = String::new();
        let mut expected = String::new();
        let mut inserted = 0;

        for (i, c) in chunks.iter().enumerate() {
            let n = markers_between[i];
            for _ in 0..n {
                input.push_str(ESMODULE_MARKER);
            }
            inserted += n;
            input.push_str(c);
            expected.push_str(c);
        }

        let (out, removed) = strip_marker(&input, ESMODULE_MARKER);

        prop_assert_eq!(removed, inserted);
        prop_assert_eq!(out.matches(ESMODULE_MARKER).count(), 0);
        prop_assert_eq!(&out, &expected);
    }

    #[test]
    fn stripping_is_idempotent(text in "[ -~\n]{0,200}") {
        let (once, _) = strip_marker(&text, ESMODULE_MARKER);
        let (twice, removed_again) = strip_marker(&once, ESMODULE_MARKER);

        prop_assert_eq!(removed_again, 0);
        prop_assert_eq!(twice, once);
    }
}
