//! Profile screen: name, password change and photo upload.

mod render;

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gymtrack_core::api::{ApiError, ApiErrorKind, User};
use gymtrack_core::forms::{Field, FieldError, ProfileDraft};
pub use render::render_profile;

use crate::common::TextField;
use crate::features::form::Form;
use crate::features::{Request, ScreenUpdate};
use crate::toast::ToastKind;

#[derive(Debug, Clone)]
pub struct ProfileState {
    pub form: Form,
}

impl ProfileState {
    pub fn new(user: Option<&User>) -> Self {
        let name = user.map(|u| u.name.clone()).unwrap_or_default();
        let form = Form::new(vec![
            (Field::Name, TextField::with_value(name)),
            (Field::OldPassword, TextField::masked()),
            (Field::Password, TextField::masked()),
            (Field::PasswordConfirm, TextField::masked()),
            (Field::Avatar, TextField::default()),
        ])
        .with_label(Field::Password, "New password")
        .with_label(Field::PasswordConfirm, "Confirm new password")
        .with_label(Field::Avatar, "Photo file");
        Self { form }
    }

    pub fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.form.value(Field::Name).trim().to_string(),
            old_password: self.form.value(Field::OldPassword).to_string(),
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
        ScreenUpdate::stay().with_request(Request::UpdateProfile {
            old_password: draft.old_password().map(str::to_string),
            password: draft.new_password().map(str::to_string),
            name: draft.name,
        })
    }

    pub fn submit_avatar(&mut self) -> ScreenUpdate {
        let path = self.form.value(Field::Avatar).trim();
        if path.is_empty() {
            self.form.set_errors(
                FieldError::new(Field::Avatar, "Enter the path of an image file").into(),
            );
            return ScreenUpdate::stay();
        }
        let path = PathBuf::from(path);
        self.form.clear_errors();
        ScreenUpdate::stay().with_request(Request::UploadAvatar { path })
    }

    pub fn handle_key(&mut self, key: KeyEvent, busy: bool) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            _ if busy => ScreenUpdate::stay(),
            KeyCode::Char('u') if ctrl => self.submit_avatar(),
            KeyCode::Enter if self.form.focused() == Field::Avatar => self.submit_avatar(),
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    pub fn handle_updated(&mut self, result: Result<(), ApiError>) -> ScreenUpdate {
        match result {
            Ok(()) => {
                self.form.clear(Field::OldPassword);
                self.form.clear(Field::Password);
                self.form.clear(Field::PasswordConfirm);
                ScreenUpdate::notify(ToastKind::Info, "Profile updated!")
            }
            Err(err) => ScreenUpdate::notify(ToastKind::Error, err.message),
        }
    }

    pub fn handle_avatar(&mut self, result: Result<Option<String>, ApiError>) -> ScreenUpdate {
        match result {
            Ok(_) => {
                self.form.clear(Field::Avatar);
                ScreenUpdate::notify(ToastKind::Info, "Photo updated!")
            }
            Err(err) if err.kind == ApiErrorKind::InvalidInput => {
                self.form
                    .set_errors(FieldError::new(Field::Avatar, err.message.clone()).into());
                ScreenUpdate::notify(ToastKind::Error, err.message)
            }
            Err(err) => ScreenUpdate::notify(ToastKind::Error, err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use gymtrack_core::forms;

    use super::*;
    use crate::features::ScreenAction;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn user() -> User {
        User {
            id: "1".into(),
            name: "Ana".into(),
            email: "ana@gym.com".into(),
            avatar: None,
        }
    }

    #[test]
    fn test_name_is_prefilled() {
        let profile = ProfileState::new(Some(&user()));
        assert_eq!(profile.form.value(Field::Name), "Ana");
    }

    #[test]
    fn test_name_only_update() {
        let mut profile = ProfileState::new(Some(&user()));
        profile.form.paste(" Maria");
        let update = profile.handle_key(key(KeyCode::Enter), false);
        assert_eq!(
            update.requests,
            vec![Request::UpdateProfile {
                name: "Ana Maria".into(),
                old_password: None,
                password: None,
            }]
        );
    }

    #[test]
    fn test_password_without_confirmation_is_rejected() {
        let mut profile = ProfileState::new(Some(&user()));
        profile.form.focus_next();
        profile.form.paste("old123");
        profile.form.focus_next();
        profile.form.paste("new123");
        let update = profile.handle_key(key(KeyCode::Enter), false);
        assert!(update.requests.is_empty());
        assert_eq!(profile.form.focused(), Field::PasswordConfirm);
    }

    #[test]
    fn test_password_change_request() {
        let mut profile = ProfileState::new(Some(&user()));
        for value in ["", "old123", "new123", "new123"] {
            profile.form.paste(value);
            profile.form.focus_next();
        }
        profile.form.focus_prev();
        let update = profile.handle_key(key(KeyCode::Enter), false);
        assert_eq!(
            update.requests,
            vec![Request::UpdateProfile {
                name: "Ana".into(),
                old_password: Some("old123".into()),
                password: Some("new123".into()),
            }]
        );
    }

    #[test]
    fn test_avatar_needs_path() {
        let mut profile = ProfileState::new(Some(&user()));
        let update = profile.handle_key(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            false,
        );
        assert!(update.requests.is_empty());
        assert!(profile.form.error(Field::Avatar).is_some());
    }

    #[test]
    fn test_enter_on_photo_field_uploads() {
        let mut profile = ProfileState::new(Some(&user()));
        for _ in 0..4 {
            profile.form.focus_next();
        }
        profile.form.paste("/tmp/me.png");
        let update = profile.handle_key(key(KeyCode::Enter), false);
        assert_eq!(
            update.requests,
            vec![Request::UploadAvatar {
                path: PathBuf::from("/tmp/me.png")
            }]
        );
    }

    #[test]
    fn test_updated_clears_passwords() {
        let mut profile = ProfileState::new(Some(&user()));
        profile.form.focus_next();
        profile.form.paste("old123");
        let update = profile.handle_updated(Ok(()));
        assert_eq!(profile.form.value(Field::OldPassword), "");
        assert_eq!(
            update.action,
            ScreenAction::Notify(ToastKind::Info, "Profile updated!".into())
        );
    }

    #[test]
    fn test_avatar_server_error_leaves_field_clean() {
        let mut profile = ProfileState::new(Some(&user()));
        let update = profile.handle_avatar(Err(ApiError::new(ApiErrorKind::Status(500), "down")));
        assert_eq!(profile.form.error(Field::Avatar), None);
        assert_eq!(update.action, ScreenAction::Notify(ToastKind::Error, "down".into()));
    }

    #[test]
    fn test_avatar_too_large_marks_field() {
        let mut profile = ProfileState::new(Some(&user()));
        profile.handle_avatar(Err(ApiError::invalid_input(forms::AVATAR_TOO_LARGE)));
        assert_eq!(
            profile.form.error(Field::Avatar),
            Some(forms::AVATAR_TOO_LARGE)
        );
    }
}
