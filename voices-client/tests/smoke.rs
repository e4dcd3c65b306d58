use std::time::{SystemTime, UNIX_EPOCH};

use voices_client::{PostInput, VoicesClient, VoicesClientError};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn base_url() -> String {
    std::env::var("VOICES_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

fn sample_post() -> PostInput {
    PostInput {
        title: "smoke title".to_string(),
        content: "smoke content".to_string(),
        category: "general".to_string(),
        institution: "Smoke University".to_string(),
        images: Vec::new(),
    }
}

#[tokio::test]
#[ignore = "requires running HTTP server and database"]
async fn full_post_lifecycle() {
    let client = VoicesClient::new(base_url());

    let suffix = unique_suffix();
    let email = format!("smoke_{suffix}@example.com");
    let password = "secret";

    client
        .register("Smoke Tester", &email, password)
        .await
        .expect("register must succeed");

    let user = client
        .login(&email, password)
        .await
        .expect("login must succeed");
    assert_eq!(user.email, email);

    let post_id = client
        .create_post(user.id, &sample_post())
        .await
        .expect("create_post must succeed");
    assert!(post_id > 0);

    // A fresh post has no engagement yet.
    let fetched = client
        .get_post(post_id, Some(user.id))
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched.id, post_id);
    assert_eq!(fetched.likes, 0);
    assert!(fetched.comments.is_empty());
    assert!(!fetched.user_liked);

    let liked = client
        .toggle_like(post_id, user.id)
        .await
        .expect("toggle must succeed");
    assert!(liked.liked);
    assert_eq!(liked.likes_count, 1);

    let unliked = client
        .toggle_like(post_id, user.id)
        .await
        .expect("toggle must succeed");
    assert!(!unliked.liked);
    assert_eq!(unliked.likes_count, 0);

    let comment = client
        .create_comment(post_id, user.id, "first!")
        .await
        .expect("comment must succeed");
    assert_eq!(comment.content, "first!");

    let recent = client
        .recent_posts(Some(10))
        .await
        .expect("recent must succeed");
    assert!(recent.iter().any(|post| post.id == post_id));

    client
        .delete_post(user.id, post_id)
        .await
        .expect("delete must succeed");

    let missing = client
        .get_post(post_id, None)
        .await
        .expect_err("post must be gone");
    assert!(matches!(missing, VoicesClientError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires running HTTP server and database"]
async fn duplicate_email_and_bad_login_are_rejected() {
    let client = VoicesClient::new(base_url());

    let suffix = unique_suffix();
    let email = format!("dup_{suffix}@example.com");

    client
        .register("First", &email, "secret")
        .await
        .expect("register must succeed");

    let duplicate = client
        .register("Second", &email, "secret")
        .await
        .expect_err("duplicate email must be rejected");
    match duplicate {
        VoicesClientError::InvalidRequest(message) => {
            assert_eq!(message, "Email already exists");
        }
        other => panic!("expected InvalidRequest, got {other:?}"),
    }

    // Wrong password and unknown email must be indistinguishable.
    let wrong_password = client
        .login(&email, "not-the-password")
        .await
        .expect_err("login must fail");
    let unknown_email = client
        .login(&format!("ghost_{suffix}@example.com"), "whatever")
        .await
        .expect_err("login must fail");

    match (&wrong_password, &unknown_email) {
        (
            VoicesClientError::Unauthorized(first),
            VoicesClientError::Unauthorized(second),
        ) => assert_eq!(first, second),
        other => panic!("expected two Unauthorized errors, got {other:?}"),
    }
}
