mod common;
mod vocabulary;
