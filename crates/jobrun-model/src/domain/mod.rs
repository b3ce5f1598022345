mod kv;
pub use kv::KeyValue;

mod props;
pub use props::Props;

mod legacy;
pub use legacy::LegacyProps;

mod constants;
pub use constants::{
    CANCEL_METHOD_KEY, DEFAULT_CANCEL_METHOD, DEFAULT_RUN_METHOD, JOB_CLASS_KEY, JOB_NAME_ENV,
    JOB_OUTPUT_PROP_FILE_ENV, JOB_PROP_FILE_ENV, LEGACY_WRAPPER_TYPES, RUN_METHOD_KEY,
};
