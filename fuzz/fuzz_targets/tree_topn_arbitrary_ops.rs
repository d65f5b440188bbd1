#![no_main]

use libfuzzer_sys::fuzz_target;
use rankkit::policy::tree::TreeTopN;
use rankkit::traits::TopN;

// Fuzz arbitrary operation sequences on TreeTopN in every tie mode
//
// data[0] picks n, data[1] picks the ceiling (0 = lenient); the rest is read
// as (op, value) pairs. Values are folded into a small range to force ties.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let n = usize::from(data[0] % 12) + 1;
    let mut topn: TreeTopN<u8> = match data[1] % 8 {
        0 => TreeTopN::lenient(n),
        extra => TreeTopN::with_max(n, n + usize::from(extra) - 1),
    };
    let ceiling = topn.max_len();

    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 4;
        let value = data[idx + 1] % 10;

        match op {
            0 | 1 => {
                let len_before = topn.len();
                let changed = topn.add(value);
                if changed {
                    assert!(topn.contains(&value));
                } else {
                    assert_eq!(topn.len(), len_before);
                }
            }
            2 => {
                let contains = topn.contains(&value);
                assert_eq!(contains, topn.iter().any(|v| *v == value));
                assert_eq!(topn.iter().count(), topn.len());
            }
            3 => {
                if value == 0 {
                    topn.clear();
                    assert!(topn.is_empty());
                }
            }
            _ => unreachable!(),
        }

        if let Some(max) = ceiling {
            assert!(topn.len() <= max);
        }
        assert!(topn.check_invariants().is_ok());
        idx += 2;
    }
});
