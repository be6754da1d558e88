mod common;
mod wizards;
