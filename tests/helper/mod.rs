#![allow(dead_code)]

mod retriever;

pub use retriever::StubRetriever;
