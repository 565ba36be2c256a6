/// Pushes the error and skips to the next item of the loop.
macro_rules! continue_ts {
    ($v:expr, $errors:ident) => {
        match $v {
            Ok(v) => v,
            Err(e) => {
                $errors.push(e);
                continue;
            }
        }
    };
}

/// Returns the error tokens from the generating function.
macro_rules! try_ts {
    ($v:expr) => {
        match $v {
            Ok(v) => v,
            Err(e) => return e,
        }
    };
}
