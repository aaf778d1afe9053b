// `#[validate(.., message = ..)]` attributes repeat some of these literals; keep them equal.

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 100;
pub const NAME_MIN: usize = 4;

pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const PASSWORD_TOO_LONG: &str = "Password must not exceed 100 characters";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const EMAIL_INVALID: &str = "Invalid email";
pub const PHONE_NUMBER_LENGTH: &str = "Phone number must have 10 to 11 digits";
pub const USER_NAME_TOO_SHORT: &str = "Username must be at least 4 characters";
pub const STUDENT_CODE_TOO_SHORT: &str = "Student code must be at least 4 characters";
pub const DATE_OF_BIRTH_REQUIRED: &str = "Date of birth is required";
pub const DATE_OF_BIRTH_INVALID: &str = "Date of birth must be a valid date";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const GENDER_REQUIRED: &str = "Gender is required";
pub const ROLE_REQUIRED: &str = "Role is required";
pub const TASK_NAME_REQUIRED: &str = "Task name is required";

// Server-reported duplicates
pub const EMAIL_TAKEN: &str = "Email already exists or is invalid";
pub const PHONE_NUMBER_TAKEN: &str = "Phone number already exists or is invalid";
pub const USER_NAME_TAKEN: &str = "Username already exists";
pub const STUDENT_CODE_TAKEN: &str = "Student code already exists";

pub const GENERIC_FAILURE: &str = "An error occurred, please try again";
