use crate::error::GateError;

pub const ACCESS_CODE: &str = "0520";

pub fn check_access(code: &str) -> Result<(), GateError> {
    if code == ACCESS_CODE {
        Ok(())
    } else {
        Err(GateError::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_shared_code_opens() {
        assert_eq!(check_access("0520"), Ok(()));
        assert_eq!(check_access(" 0520"), Err(GateError::Rejected));
        assert_eq!(
            check_access("").unwrap_err().to_string(),
            "잘못된 비밀번호입니다."
        );
    }
}
