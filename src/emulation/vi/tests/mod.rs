mod common;
mod editing;
mod ex;
