pub mod converter;

pub use converter::{
    ConvertError, ConvertReport, ConvertRequest, Converter, EdgeMethod, EdgeRequest,
};
