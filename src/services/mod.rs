pub mod dividers;
pub mod encoding;
pub mod expand;
pub mod export;
pub mod inheritance;
pub mod markup;
pub mod normalize;
pub mod pipeline;
pub mod replacement;
pub mod sort;
