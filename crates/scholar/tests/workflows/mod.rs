use super::*;

mod journal;
mod single_export;
