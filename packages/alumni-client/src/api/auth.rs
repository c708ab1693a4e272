//! Authentication operations.

use serde::Serialize;

use super::{BodyShape, Domain, EmailRequest, Operation};
use crate::dispatch::{FilePart, Method, RequestDescriptor};
use crate::error::Result;

pub const LOGIN: Operation = Operation::new(
    Domain::Auth,
    "login",
    Method::Post,
    "/auth/login",
    false,
    BodyShape::Json,
)
.issuing_credential();

pub const REGISTER: Operation = Operation::new(
    Domain::Auth,
    "register",
    Method::Post,
    "/auth/register",
    false,
    BodyShape::Json,
);

pub const VERIFY_EMAIL: Operation = Operation::new(
    Domain::Auth,
    "verify-email",
    Method::Post,
    "/auth/verify",
    false,
    BodyShape::Json,
)
.issuing_credential();

pub const RESEND_VERIFICATION: Operation = Operation::new(
    Domain::Auth,
    "resend-verification",
    Method::Post,
    "/auth/resend-verification",
    false,
    BodyShape::Json,
);

pub const REQUEST_MANUAL_VERIFICATION: Operation = Operation::new(
    Domain::Auth,
    "request-manual-verification",
    Method::Post,
    "/auth/request-manual-verification",
    false,
    BodyShape::Json,
);

pub const VERIFY_GRADUATE: Operation = Operation::new(
    Domain::Auth,
    "verify-graduate",
    Method::Post,
    "/auth/verify-graduate",
    false,
    BodyShape::Json,
)
.issuing_credential();

pub const IMPORT_ALUMNI: Operation = Operation::new(
    Domain::Auth,
    "import-alumni",
    Method::Post,
    "/auth/import-alumni",
    true,
    BodyShape::Multipart,
);

pub const ADD_ADMIN: Operation = Operation::new(
    Domain::Auth,
    "add-admin",
    Method::Post,
    "/auth/add-admin",
    true,
    BodyShape::Json,
);

/// Email and password, used for login and for creating an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub graduation_year: String,
    pub telegram_alias: String,
    pub manual_verification: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyGraduateRequest {
    pub email: String,
    pub password: String,
    pub graduation_year: i32,
    pub first_name: String,
}

pub fn login(credentials: &Credentials) -> Result<RequestDescriptor> {
    LOGIN.json_descriptor(&[], credentials)
}

pub fn register(request: &RegisterRequest) -> Result<RequestDescriptor> {
    REGISTER.json_descriptor(&[], request)
}

pub fn verify_email(request: &VerifyEmailRequest) -> Result<RequestDescriptor> {
    VERIFY_EMAIL.json_descriptor(&[], request)
}

pub fn resend_verification(email: impl Into<String>) -> Result<RequestDescriptor> {
    RESEND_VERIFICATION.json_descriptor(&[], &EmailRequest::new(email))
}

pub fn request_manual_verification(email: impl Into<String>) -> Result<RequestDescriptor> {
    REQUEST_MANUAL_VERIFICATION.json_descriptor(&[], &EmailRequest::new(email))
}

pub fn verify_graduate(request: &VerifyGraduateRequest) -> Result<RequestDescriptor> {
    VERIFY_GRADUATE.json_descriptor(&[], request)
}

/// Upload an alumni spreadsheet.
pub fn import_alumni(file: FilePart) -> Result<RequestDescriptor> {
    IMPORT_ALUMNI.multipart_descriptor(&[], file)
}

pub fn add_admin(credentials: &Credentials) -> Result<RequestDescriptor> {
    ADD_ADMIN.json_descriptor(&[], credentials)
}
