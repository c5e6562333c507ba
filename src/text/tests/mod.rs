mod common;
mod cursor;
