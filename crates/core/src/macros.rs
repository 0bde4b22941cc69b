//! `pipe!` and `apipe!`: a whole pipeline in one expression

/// Build a [`Pipeline`](crate::Pipeline) from an input and a list of steps
#[macro_export]
macro_rules! pipe {
    ($value:expr) => {
        $crate::Pipeline::pipe($value)
    };
    ($value:expr, $($func:expr),+ $(,)?) => {{
        let pipeline = $crate::Pipeline::pipe($value);
        $(
            let pipeline = pipeline.step($func);
        )+
        pipeline
    }};
}

/// Build an [`AsyncPipeline`](crate::AsyncPipeline) from an input and a list of async steps
#[macro_export]
macro_rules! apipe {
    ($value:expr) => {
        $crate::AsyncPipeline::pipe($value)
    };
    ($value:expr, $($func:expr),+ $(,)?) => {{
        let pipeline = $crate::AsyncPipeline::pipe($value);
        $(
            let pipeline = pipeline.step($func);
        )+
        pipeline
    }};
}
