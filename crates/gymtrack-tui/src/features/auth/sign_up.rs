//! Sign-up screen state and key handling.

use crossterm::event::{KeyCode, KeyEvent};
use gymtrack_core::core::routes::{AuthRoute, Screen};
use gymtrack_core::forms::{Field, SignUpDraft};

use crate::common::TextField;
use crate::features::form::Form;
use crate::features::{Request, ScreenUpdate};
use crate::toast::ToastKind;

#[derive(Debug, Clone)]
pub struct SignUpState {
    pub form: Form,
}

impl Default for SignUpState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![
                (Field::Name, TextField::default()),
                (Field::Email, TextField::default()),
                (Field::Password, TextField::masked()),
                (Field::PasswordConfirm, TextField::masked()),
            ]),
        }
    }
}

impl SignUpState {
    pub fn draft(&self) -> SignUpDraft {
        SignUpDraft {
            name: self.form.value(Field::Name).trim().to_string(),
            email: self.form.value(Field::Email).trim().to_string(),
            password: self.form.value(Field::Password).to_string(),
            password_confirm: self.form.value(Field::PasswordConfirm).to_string(),
        }
    }

    pub fn submit(&mut self) -> ScreenUpdate {
        let draft = self.draft();
        if let Err(errors) = draft.validate() {
            self.form.set_errors(errors);
            return ScreenUpdate::stay();
        }
        self.form.clear_errors();
        ScreenUpdate::stay().with_request(Request::SignUp {
            name: draft.name,
            email: draft.email,
            password: draft.password,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent, busy: bool) -> ScreenUpdate {
        match key.code {
            KeyCode::Esc => ScreenUpdate::navigate(Screen::Auth(AuthRoute::SignIn)),
            _ if busy => ScreenUpdate::stay(),
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    pub fn handle_result(&mut self, result: Result<(), String>) -> ScreenUpdate {
        match result {
            Ok(()) => ScreenUpdate::stay(),
            Err(message) => ScreenUpdate::notify(ToastKind::Error, message),
        }
    }
}
