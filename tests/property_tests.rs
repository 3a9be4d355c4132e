use quickcheck::quickcheck;
use seqpipe::collectors::{partitioning_by, to_list};
use seqpipe::pipeline::Pipeline;
use std::collections::HashSet;

quickcheck! {
    fn prop_map_preserves_count(xs: Vec<i32>) -> bool {
        let expected = xs.len();
        Pipeline::from_iter(xs).map(|x| x.wrapping_mul(2)).count().unwrap() == expected
    }

    fn prop_filter_never_grows(xs: Vec<i32>) -> bool {
        let expected = xs.len();
        Pipeline::from_iter(xs).filter(|x| x % 2 == 0).count().unwrap() <= expected
    }

    fn prop_distinct_is_duplicate_free_subset(xs: Vec<i32>) -> bool {
        let input: HashSet<i32> = xs.iter().copied().collect();
        let output = Pipeline::from_iter(xs).distinct().collect(to_list()).unwrap();
        let unique: HashSet<i32> = output.iter().copied().collect();
        unique.len() == output.len() && unique.is_subset(&input)
    }

    fn prop_limit_count_is_min(xs: Vec<i32>, n: usize) -> bool {
        let expected = n.min(xs.len());
        Pipeline::from_iter(xs).limit(n).count().unwrap() == expected
    }

    fn prop_limit_plus_skip_reconstitutes_multiset(xs: Vec<i32>, n: usize) -> bool {
        let n = n % (xs.len() + 1);
        let mut recombined = Pipeline::from_iter(xs.clone()).limit(n).collect(to_list()).unwrap();
        recombined.extend(Pipeline::from_iter(xs.clone()).skip(n).collect(to_list()).unwrap());
        let mut original = xs;
        recombined.sort_unstable();
        original.sort_unstable();
        recombined == original
    }

    fn prop_partition_is_complete_and_faithful(xs: Vec<i32>) -> bool {
        let expected = xs.len();
        let partition = Pipeline::from_iter(xs).collect(partitioning_by(|x| x % 2 == 0)).unwrap();
        partition.matched.len() + partition.unmatched.len() == expected
            && partition.matched.iter().all(|x| x % 2 == 0)
            && partition.unmatched.iter().all(|x| x % 2 != 0)
    }

    fn prop_concat_count_is_sum(xs: Vec<i32>, ys: Vec<i32>) -> bool {
        let expected = xs.len() + ys.len();
        Pipeline::concat(Pipeline::from_iter(xs), Pipeline::from_iter(ys)).count().unwrap()
            == expected
    }

    fn prop_sorted_is_ordered_permutation(xs: Vec<i32>) -> bool {
        let sorted = Pipeline::from_iter(xs.clone()).sorted().collect(to_list()).unwrap();
        let mut expected = xs;
        expected.sort_unstable();
        sorted == expected
    }
}
