//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::net::api::new_session;
use crate::pages::{
    create_group::CreateGroupPage, edit_post::EditPostPage, feed::FeedPage, group::GroupPage, home::HomePage,
    login::LoginPage, new_post::NewPostPage, profile::ProfilePage,
};
use crate::state::auth::AuthContext;

/// Root application component.
///
/// Builds the session store, provides it as context, bootstraps it once,
/// and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new(new_session());
    provide_context(auth);
    leptos::task::spawn_local(async move {
        let _ = auth.bootstrap().await;
    });

    view! {
        <Title text="Mural"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("feed") view=FeedPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=StaticSegment("create-group") view=CreateGroupPage/>
                    <Route path=(StaticSegment("groups"), ParamSegment("id")) view=GroupPage/>
                    <Route path=(StaticSegment("posts"), StaticSegment("new")) view=NewPostPage/>
                    <Route
                        path=(StaticSegment("posts"), ParamSegment("id"), StaticSegment("edit"))
                        view=EditPostPage
                    />
                </Routes>
            </main>
        </Router>
    }
}
