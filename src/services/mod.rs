pub mod chunker;
pub mod extractor;
pub mod llm;
pub mod persister;
pub mod quiz;

#[cfg(test)]
pub mod testing;
