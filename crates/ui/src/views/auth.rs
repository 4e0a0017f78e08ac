use dioxus::prelude::*;

use portal_core::model::Role;
use services::{Registration, SessionError};

use crate::context::AppContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthTab {
    Login,
    Register,
}

/// The gate in front of everything: login/register toggle plus the demo
/// credential hint. Success needs no callback — the session subscription in
/// the shell re-resolves the identity when the provider fires.
#[component]
pub fn AuthPage() -> Element {
    let mut tab = use_signal(|| AuthTab::Login);

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                header { class: "auth-brand",
                    span { class: "auth-logo", "📖" }
                    div {
                        h1 { "Gyan Setu" }
                        p { class: "auth-tagline", "Bridge of Knowledge" }
                    }
                }

                div { class: "auth-tabs",
                    button {
                        class: if tab() == AuthTab::Login { "auth-tab auth-tab--active" } else { "auth-tab" },
                        r#type: "button",
                        onclick: move |_| tab.set(AuthTab::Login),
                        "Login"
                    }
                    button {
                        class: if tab() == AuthTab::Register { "auth-tab auth-tab--active" } else { "auth-tab" },
                        r#type: "button",
                        onclick: move |_| tab.set(AuthTab::Register),
                        "Register"
                    }
                }

                match tab() {
                    AuthTab::Login => rsx! {
                        LoginForm {}
                    },
                    AuthTab::Register => rsx! {
                        RegisterForm {}
                    },
                }

                div { class: "auth-demo",
                    p {
                        strong { "Demo Credentials:" }
                        br {}
                        "Student: student@example.com / password123"
                        br {}
                        "Teacher: teacher@example.com / password123"
                    }
                }
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let ctx = use_context::<AppContext>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<&'static str>);
    let mut busy = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        let session = ctx.session();
        spawn(async move {
            busy.set(true);
            error.set(None);
            // Any login failure renders the same generic line.
            if session.login(&email(), &password()).await.is_err() {
                error.set(Some("Invalid email or password"));
                busy.set(false);
            }
        });
    };

    rsx! {
        div { class: "auth-form",
            if let Some(message) = error() {
                p { class: "auth-error", "{message}" }
            }
            label { class: "field-label", "Email Address" }
            input {
                class: "field-input",
                r#type: "email",
                placeholder: "your@email.com",
                value: "{email()}",
                oninput: move |evt| email.set(evt.value()),
            }
            label { class: "field-label", "Password" }
            input {
                class: "field-input",
                r#type: "password",
                placeholder: "••••••••",
                value: "{password()}",
                oninput: move |evt| password.set(evt.value()),
            }
            button {
                class: "btn btn-primary auth-submit",
                r#type: "button",
                disabled: busy(),
                onclick: submit,
                if busy() { "Logging in..." } else { "Login" }
            }
        }
    }
}

#[component]
fn RegisterForm() -> Element {
    let ctx = use_context::<AppContext>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut school = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut error = use_signal(|| None::<&'static str>);
    let mut busy = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        let session = ctx.session();
        spawn(async move {
            busy.set(true);
            error.set(None);
            let registration = Registration {
                email: email(),
                password: password(),
                full_name: full_name(),
                role: role(),
                school: school(),
            };
            match session.register(registration).await {
                Ok(_) => {}
                Err(SessionError::EmailTaken) => {
                    error.set(Some("An account with this email already exists"));
                    busy.set(false);
                }
                Err(_) => {
                    error.set(Some("Registration failed. Please try again."));
                    busy.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "auth-form",
            if let Some(message) = error() {
                p { class: "auth-error", "{message}" }
            }
            label { class: "field-label", "Full Name" }
            input {
                class: "field-input",
                r#type: "text",
                placeholder: "Your name",
                value: "{full_name()}",
                oninput: move |evt| full_name.set(evt.value()),
            }
            label { class: "field-label", "Email Address" }
            input {
                class: "field-input",
                r#type: "email",
                placeholder: "your@email.com",
                value: "{email()}",
                oninput: move |evt| email.set(evt.value()),
            }
            label { class: "field-label", "Password" }
            input {
                class: "field-input",
                r#type: "password",
                placeholder: "••••••••",
                value: "{password()}",
                oninput: move |evt| password.set(evt.value()),
            }
            label { class: "field-label", "School" }
            input {
                class: "field-input",
                r#type: "text",
                placeholder: "Your school",
                value: "{school()}",
                oninput: move |evt| school.set(evt.value()),
            }
            label { class: "field-label", "I am a" }
            select {
                class: "field-input",
                onchange: move |evt| {
                    role.set(if evt.value() == "teacher" {
                        Role::Teacher
                    } else {
                        Role::Student
                    });
                },
                option { value: "student", "Student" }
                option { value: "teacher", "Teacher" }
            }
            button {
                class: "btn btn-primary auth-submit",
                r#type: "button",
                disabled: busy(),
                onclick: submit,
                if busy() { "Creating account..." } else { "Register" }
            }
        }
    }
}
