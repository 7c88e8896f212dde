pub mod form_dto;
pub mod request;
pub mod response;
