// Request-body utilities shared by the document endpoints.
// Each helper returns either usable data or a terminal `AppError` that the
// handler propagates with `?`.

pub mod payload;
pub mod validation;

pub use payload::read_json_payload;
pub use validation::validate_payload;
