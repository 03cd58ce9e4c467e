mod common;
mod explanation;
mod policy;
