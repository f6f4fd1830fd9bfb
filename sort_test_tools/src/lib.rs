/// A sort under test. Elements are `Copy`, every implementation moves them bitwise.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Copy;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Copy,
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod patterns;
