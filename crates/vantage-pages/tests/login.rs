//! Login scenario specifications.
//!
//! Self-contained fixture pages mirror the login screen's accessible
//! structure; every credential submitted against the fixture is
//! rejected, which is exactly the behavior under test.

use vantage_browser::{BrowserEngine, Session};
use vantage_core::{AppConfig, TestFixture};
use vantage_pages::{LoginPage, PageObject};

async fn session() -> (BrowserEngine, Session) {
    vantage_core::init_test_logging();
    let config = AppConfig::load_with_env().expect("load suite config");
    let engine = BrowserEngine::launch(&config)
        .await
        .expect("launch browser engine");
    let session = engine.new_session().await.expect("open session");
    (engine, session)
}

fn login_fixture() -> String {
    let html = "<html><body>\
        <form onsubmit=\"event.preventDefault(); \
            document.getElementById('err').style.display='block';\">\
          <label for='u'>Username</label><input id='u' type='text' />\
          <label for='p'>Password</label><input id='p' type='password' />\
          <button type='submit'>Log in</button>\
        </form>\
        <div id='err' role='alert' style='display:none'>Invalid username or password</div>\
        </body></html>";
    format!("data:text/html,{html}")
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn displays_login_form() {
    let (_engine, session) = session().await;
    let login = LoginPage::new(&session);
    login.navigate(&login_fixture()).await.expect("navigate");

    login.verify_form_visible().await.expect("form visible");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn invalid_credentials_show_error() {
    let (_engine, session) = session().await;
    let login = LoginPage::new(&session);
    login.navigate(&login_fixture()).await.expect("navigate");

    login
        .login("invalid", "credentials")
        .await
        .expect("submit login form");
    login
        .verify_login_error("Invalid username or password")
        .await
        .expect("error alert with exact text");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn unknown_generated_user_is_rejected() {
    let (_engine, session) = session().await;
    session.clear_client_storage().await.expect("clean slate");

    let login = LoginPage::new(&session);
    login.navigate(&login_fixture()).await.expect("navigate");

    let fixture = TestFixture::generate();
    login
        .login(&fixture.username, &fixture.password)
        .await
        .expect("submit login form");
    login
        .verify_login_error("Invalid username or password")
        .await
        .expect("generated user rejected");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium and a reachable target
async fn live_target_displays_login_form() {
    let (_engine, session) = session().await;
    let login = LoginPage::new(&session);
    login.open().await.expect("open login page");

    login.verify_form_visible().await.expect("form visible");
}
