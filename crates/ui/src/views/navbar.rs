use dioxus::prelude::*;

use portal_core::model::Identity;

use crate::context::AppContext;

#[component]
pub fn Navbar(user: Identity) -> Element {
    let ctx = use_context::<AppContext>();
    let role_label = user.role().to_string();

    rsx! {
        nav { class: "navbar",
            div { class: "navbar-brand",
                span { class: "navbar-logo", "📖" }
                span { class: "navbar-title", "Gyan Setu" }
            }
            div { class: "navbar-user",
                span { class: "navbar-name",
                    "{user.full_name()}"
                    span { class: "role-badge", "{role_label}" }
                }
                button {
                    class: "btn navbar-logout",
                    r#type: "button",
                    onclick: move |_| {
                        let session = ctx.session();
                        spawn(async move {
                            // The sign-out event flips the shell back to the
                            // auth page; a rejected remote invalidation still
                            // clears the local session.
                            let _ = session.logout().await;
                        });
                    },
                    "Logout"
                }
            }
        }
    }
}
