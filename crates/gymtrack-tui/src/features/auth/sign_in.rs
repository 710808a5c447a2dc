//! Sign-in screen state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gymtrack_core::api::{AuthError, User};
use gymtrack_core::core::routes::{AuthRoute, Screen};
use gymtrack_core::forms::{Field, SignInDraft};

use crate::common::TextField;
use crate::features::form::Form;
use crate::features::{Request, ScreenUpdate};
use crate::toast::ToastKind;

#[derive(Debug, Clone)]
pub struct SignInState {
    pub form: Form,
}

impl Default for SignInState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![
                (Field::Email, TextField::default()),
                (Field::Password, TextField::masked()),
            ]),
        }
    }
}

impl SignInState {
    pub fn draft(&self) -> SignInDraft {
        SignInDraft {
            email: self.form.value(Field::Email).trim().to_string(),
            password: self.form.value(Field::Password).to_string(),
        }
    }

    /// Validates and, if valid, asks for a sign-in.
    pub fn submit(&mut self) -> ScreenUpdate {
        let draft = self.draft();
        if let Err(errors) = draft.validate() {
            self.form.set_errors(errors);
            return ScreenUpdate::stay();
        }
        self.form.clear_errors();
        ScreenUpdate::stay().with_request(Request::SignIn {
            email: draft.email,
            password: draft.password,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent, busy: bool) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('n') if ctrl => ScreenUpdate::navigate(Screen::Auth(AuthRoute::SignUp)),
            _ if busy => ScreenUpdate::stay(),
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    /// Applies the result of a sign-in attempt.
    ///
    /// Success needs no screen change here: the session holder publishes
    /// the new state and the route selector remounts the app screens.
    pub fn handle_result(&mut self, result: Result<User, AuthError>) -> ScreenUpdate {
        match result {
            Ok(_) => ScreenUpdate::stay(),
            Err(err) => {
                self.form.clear(Field::Password);
                ScreenUpdate::notify(ToastKind::Error, err.message)
            }
        }
    }
}
