use survey_core::model::{AgeGroup, Gender, SignupErrors, SignupField, SignupForm};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupEdit {
    Name(String),
    Email(String),
    Gender(Gender),
    Age(AgeGroup),
}

/// Form contents plus the field errors from the last attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupVm {
    form: SignupForm,
    errors: SignupErrors,
    submitting: bool,
}

impl SignupVm {
    #[must_use]
    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Apply an edit. Editing a text field clears that field's error.
    pub fn edit(&mut self, edit: SignupEdit) {
        match edit {
            SignupEdit::Name(name) => {
                self.form.name = name;
                self.errors.clear(SignupField::Name);
            }
            SignupEdit::Email(email) => {
                self.form.email = email;
                self.errors.clear(SignupField::Email);
            }
            SignupEdit::Gender(gender) => self.form.gender = gender,
            SignupEdit::Age(age) => self.form.age = age,
        }
    }

    /// Mark the form as in flight. Returns `None` while a request is pending.
    pub fn begin_submit(&mut self) -> Option<SignupForm> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.form.clone())
    }

    pub fn submit_failed(&mut self, errors: Option<SignupErrors>) {
        self.submitting = false;
        if let Some(errors) = errors {
            self.errors = errors;
        }
    }

    #[must_use]
    pub fn field_error(&self, field: SignupField) -> Option<String> {
        self.errors.get(field).map(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_validation_shows_field_errors_until_edited() {
        let mut vm = SignupVm::default();
        let form = vm.begin_submit().unwrap();
        let errors = form.validate().unwrap_err();
        vm.submit_failed(Some(errors));

        assert!(!vm.is_submitting());
        assert_eq!(
            vm.field_error(SignupField::Name).as_deref(),
            Some("Please enter your name.")
        );
        assert!(vm.field_error(SignupField::Email).is_some());

        vm.edit(SignupEdit::Name("Ann".to_string()));
        assert_eq!(vm.field_error(SignupField::Name), None);
        assert!(vm.field_error(SignupField::Email).is_some());
    }

    #[test]
    fn second_submit_is_ignored_while_pending() {
        let mut vm = SignupVm::default();
        vm.edit(SignupEdit::Gender(Gender::Female));
        vm.edit(SignupEdit::Age(AgeGroup::Thirty));
        let form = vm.begin_submit().unwrap();
        assert_eq!(form.gender, Gender::Female);
        assert_eq!(form.age, AgeGroup::Thirty);
        assert!(vm.begin_submit().is_none());

        vm.submit_failed(None);
        assert!(vm.begin_submit().is_some());
    }
}
