//! Natural Language Processing components
//!
//! This module provides text cleaning, tokenization and stopword filtering.

pub mod cleaner;
pub mod stopwords;
pub mod tokenizer;
