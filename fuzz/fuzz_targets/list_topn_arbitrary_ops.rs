#![no_main]

use libfuzzer_sys::fuzz_target;
use rankkit::policy::list::ListTopN;
use rankkit::traits::TopN;

// Fuzz arbitrary operation sequences on ListTopN
//
// First byte picks n (and whether an exclusion strategy is installed); the
// rest is read as (op, value) pairs.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let n = usize::from(data[0] % 16) + 1;
    let mut topn: ListTopN<u8> = if data[0] & 0x80 != 0 {
        ListTopN::with_exclusion(n, |a: &u8, b: &u8| a % 7 == b % 7)
    } else {
        ListTopN::new(n)
    };

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 4;
        let value = data[idx + 1];

        match op {
            0 | 1 => {
                // add
                let before = topn.to_vec();
                let changed = topn.add(value);
                if changed {
                    assert!(topn.contains(&value));
                } else {
                    assert_eq!(topn.to_vec(), before);
                }
            }
            2 => {
                // contains agrees with iteration
                let contains = topn.contains(&value);
                assert_eq!(contains, topn.iter().any(|v| *v == value));
            }
            3 => {
                // clear (rarely)
                if value == 0 {
                    topn.clear();
                    assert!(topn.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(topn.len() <= n);
        assert!(topn.check_invariants().is_ok());
        idx += 2;
    }
});
