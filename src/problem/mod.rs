mod graph;
mod index;

pub use graph::Graph;

#[cfg(test)]
mod tests;
