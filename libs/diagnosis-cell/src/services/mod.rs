pub mod normalizer;
pub mod matcher;
pub mod knowledge_base;
pub mod suggestion;
pub mod calculator;
pub mod cache;
pub mod diagnosis;

pub use knowledge_base::{KnowledgeBase, KnowledgeBaseError};
pub use cache::{DiagnosisCache, MemoryDiagnosisCache};
pub use diagnosis::DiagnosisService;
