use serde::Serialize;

/// Success status of a service call, mirrored onto HTTP codes by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Created,
    Ok,
    NoContent,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Created => 201,
            Status::Ok => 200,
            Status::NoContent => 204,
        }
    }
}

/// Result of a successful service operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Created(T),
    Ok(T),
    /// The call succeeded but there is nothing visible to return.
    NoContent,
}

impl<T> Outcome<T> {
    pub fn status(&self) -> Status {
        match self {
            Outcome::Created(_) => Status::Created,
            Outcome::Ok(_) => Status::Ok,
            Outcome::NoContent => Status::NoContent,
        }
    }

    /// Returns the body, if any.
    pub fn into_inner(self) -> Option<T> {
        match self {
            Outcome::Created(v) | Outcome::Ok(v) => Some(v),
            Outcome::NoContent => None,
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, Outcome::NoContent)
    }
}
