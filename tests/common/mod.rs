#![allow(dead_code, unused_imports)]

pub use compilerun_test_utils::builders;
pub use compilerun_test_utils::sinks;
pub use compilerun_test_utils::{init_tracing, sh_args, with_timeout};
