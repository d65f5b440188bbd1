#![no_main]

use libfuzzer_sys::fuzz_target;
use rankkit::policy::list::ListTopN;
use rankkit::policy::tree::TreeTopN;
use rankkit::traits::TopN;

// Strict ListTopN and TreeTopN fed the same stream must stay identical and
// agree on every add result.
fuzz_target!(|data: &[u8]| {
    let Some((&first, stream)) = data.split_first() else {
        return;
    };

    let n = usize::from(first % 32) + 1;
    let mut list = ListTopN::new(n);
    let mut tree = TreeTopN::new(n);

    for &value in stream {
        let value = value % 24;
        assert_eq!(list.add(value), tree.add(value));
        assert!(list.iter().eq(tree.iter()));
    }
    assert_eq!(list.first(), tree.first());
    assert_eq!(list.last(), tree.last());
});
