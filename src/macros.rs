#[macro_export]
macro_rules! arc_str {
    ($x:expr) => {
        $crate::utils::ArcStr::from($x)
    };
}
