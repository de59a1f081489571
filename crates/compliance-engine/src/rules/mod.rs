//! Heuristic checks run against every document
//!
//! Each check is a pure function over the document's paragraph texts (or its
//! full text) and yields zero or more issues carrying the citation for its
//! topic. The analyzer runs them in a fixed order: jurisdiction, signature,
//! ambiguous language, clause numbering.

pub mod ambiguity;
pub mod jurisdiction;
pub mod numbering;
pub mod signature;
