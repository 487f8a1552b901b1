use crate::api::types::DriverApplicationRequest;

/// Mirrors the loose shape check the forms apply before hitting the
/// backend: something@something.something, no whitespace.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn is_ten_digit_phone(value: &str) -> bool {
    value.len() == 10 && value.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Please fill in all fields".into());
    }
    if !looks_like_email(email) {
        return Err("Please enter a valid email".into());
    }
    Ok(())
}

pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err("Please fill in all fields".into());
    }
    if !looks_like_email(email) {
        return Err("Please enter a valid email".into());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".into());
    }
    Ok(())
}

pub fn validate_driver_application(form: &DriverApplicationRequest) -> Result<(), String> {
    let all_present = !form.name.trim().is_empty()
        && !form.email.trim().is_empty()
        && !form.phone.trim().is_empty()
        && !form.license_number.trim().is_empty()
        && !form.vehicle_type.trim().is_empty()
        && !form.vehicle_registration.trim().is_empty();
    if !all_present {
        return Err("Please fill in all fields".into());
    }
    if !looks_like_email(&form.email) {
        return Err("Please enter a valid email".into());
    }
    if !is_ten_digit_phone(&form.phone) {
        return Err("Please enter a valid 10-digit phone number".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> DriverApplicationRequest {
        DriverApplicationRequest {
            name: "Arjun Mehta".into(),
            email: "arjun@example.com".into(),
            phone: "9876543210".into(),
            license_number: "DL-0420110012345".into(),
            vehicle_type: "Standard Ambulance".into(),
            vehicle_registration: "UP14 GT 2210".into(),
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.com"));
        assert!(!looks_like_email(""));
        assert!(!looks_like_email("plainaddress"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("a b@c.d"));
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        assert!(is_ten_digit_phone("9876543210"));
        assert!(!is_ten_digit_phone("987654321"));
        assert!(!is_ten_digit_phone("98765432101"));
        assert!(!is_ten_digit_phone("98765-4321"));
    }

    #[test]
    fn login_checks_run_in_order() {
        assert_eq!(
            validate_login("", "secret"),
            Err("Please fill in all fields".into())
        );
        assert_eq!(
            validate_login("someone@example.com", ""),
            Err("Please fill in all fields".into())
        );
        assert_eq!(
            validate_login("not-an-email", "secret"),
            Err("Please enter a valid email".into())
        );
        assert_eq!(validate_login("someone@example.com", "secret"), Ok(()));
    }

    #[test]
    fn signup_enforces_the_password_floor() {
        assert_eq!(
            validate_signup("Asha", "asha@example.com", "12345"),
            Err("Password must be at least 6 characters".into())
        );
        assert_eq!(validate_signup("Asha", "asha@example.com", "123456"), Ok(()));
    }

    #[test]
    fn driver_application_checks_every_field() {
        assert_eq!(validate_driver_application(&application()), Ok(()));

        let mut missing = application();
        missing.vehicle_registration.clear();
        assert_eq!(
            validate_driver_application(&missing),
            Err("Please fill in all fields".into())
        );

        let mut bad_phone = application();
        bad_phone.phone = "12345".into();
        assert_eq!(
            validate_driver_application(&bad_phone),
            Err("Please enter a valid 10-digit phone number".into())
        );
    }
}
