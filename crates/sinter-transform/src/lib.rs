// sinter-transform: the per-literal interpolation pass
//
// Architecture:
// - tokenize: split literal text into literal / expression fragments
// - resolve: parse expression fragments through the injected host grammar
// - splice: fold resolved fragments into one replacement expression
// - pipeline: chain the three per literal

pub mod pipeline;
pub mod resolve;
pub mod splice;
pub mod tokenize;

// Re-export key types for convenience
pub use pipeline::*;
pub use resolve::*;
pub use splice::*;
pub use tokenize::*;
