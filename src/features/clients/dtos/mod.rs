mod client_dto;

pub use client_dto::{
    ClienteEnvelope, MensajeEnvelope, RegionRefDto, SaveClienteDto, UploadFotoForm,
};
