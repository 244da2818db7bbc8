pub mod output_comparator;

pub use output_comparator::{Difference, OutputComparator};
