pub mod common;

mod test_pp_use;
