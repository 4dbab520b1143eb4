// ==========================================
// 工厂管理后台 - 登录表单
// ==========================================

use super::{FormError, FormPhase, FormResult};

/// 登录凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    phase: FormPhase,
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn set_username(&mut self, username: &str) {
        self.phase = FormPhase::Editing;
        self.username = username.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.phase = FormPhase::Editing;
        self.password = password.to_string();
    }

    /// 用户名和密码都非空才可提交
    pub fn can_submit(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn submit(&mut self) -> FormResult<Credentials> {
        if self.username.is_empty() {
            return Err(FormError::MissingField("username".to_string()));
        }
        if self.password.is_empty() {
            return Err(FormError::MissingField("password".to_string()));
        }

        let credentials = Credentials {
            username: std::mem::take(&mut self.username),
            password: std::mem::take(&mut self.password),
        };
        self.phase = FormPhase::Submitted;
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit() {
        let mut form = LoginForm::new();
        assert!(!form.can_submit());
        form.set_username("admin");
        assert!(!form.can_submit());
        assert_eq!(form.submit(), Err(FormError::MissingField("password".to_string())));

        form.set_password("secret");
        assert!(form.can_submit());
        let credentials = form.submit().unwrap();
        assert_eq!(credentials.username, "admin");
        assert!(!form.can_submit());
        assert_eq!(form.phase(), FormPhase::Submitted);
    }
}
