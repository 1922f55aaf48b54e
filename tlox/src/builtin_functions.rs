use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};
use tlox_interp::{Interpreter, Value};

/// Defines the default native functions in the global scope of `interpreter`.
pub fn add_builtin_fns<W: Write>(interpreter: &mut Interpreter<W>) {
    interpreter.add_native_fn("clock", &clock, 0);
}

/// Returns the number of seconds since the Unix epoch.
pub fn clock(_args: &mut [Value]) -> Value {
    let since_the_epoch_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |duration| duration.as_secs_f64());
    Value::Number(since_the_epoch_secs)
}
