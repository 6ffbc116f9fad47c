mod registry;

pub use registry::{
    CHIP_SAMPLE_T, CUSTOM_SCALE, Interpolator, PREVIEW_SAMPLES, ScaleEntry, ScaleLabel,
    chip_color, lookup, parse_scale_label, preview_strip, sample, whitelist, whitelist_entry,
    whitelist_len,
};
