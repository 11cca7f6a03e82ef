//! End-to-end workflows built from effects

use either_io::prelude::*;
use either_io::{assert_left, assert_right};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: u64,
    email: String,
    age: u8,
}

#[derive(Debug, PartialEq)]
enum AppError {
    AgeTooYoung,
    EmailExists(String),
    NotFound(u64),
    Unexpected(String),
}

#[derive(Debug, PartialEq)]
enum HttpError {
    Status(u16, String),
    Internal,
}

#[derive(Clone, Default)]
struct Database {
    users: Arc<Mutex<HashMap<u64, User>>>,
}

impl Database {
    fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    fn find(&self, id: u64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    fn email_exists(&self, email: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .values()
            .any(|user| user.email == email)
    }
}

fn app_failure() -> FailureFn<AppError> {
    FailureFn::new(|fault: Fault| AppError::Unexpected(fault.to_string()))
}

fn fetch_user(db: &Database, id: u64) -> EitherIO<AppError, User> {
    let db = db.clone();
    EitherIO::from_either_fn(app_failure(), move || match db.find(id) {
        Some(user) => Either::right(user),
        None => Either::left(AppError::NotFound(id)),
    })
}

fn register(db: &Database, user: User) -> EitherIO<AppError, u64> {
    let lookup = db.clone();
    let store = db.clone();
    EitherIO::of(app_failure(), user)
        .filter(|| AppError::AgeTooYoung, |user| user.age >= 18)
        .flat_map(move |user, failure| {
            if lookup.email_exists(&user.email) {
                let email = user.email.clone();
                EitherIO::raise(move || AppError::EmailExists(email.clone()))
            } else {
                EitherIO::of(failure.clone(), user)
            }
        })
        .flat_map(move |user, failure| {
            let store = store.clone();
            EitherIO::from_fn(failure.clone(), move || {
                store.insert(user.clone());
                user.id
            })
        })
}

fn to_http(effect: EitherIO<AppError, User>) -> EitherIO<HttpError, User> {
    effect.map_left(FailureFn::new(|_: Fault| HttpError::Internal), |error| match error {
        AppError::NotFound(id) => HttpError::Status(404, format!("user {} not found", id)),
        AppError::Unexpected(_) => HttpError::Internal,
        other => HttpError::Status(400, format!("{:?}", other)),
    })
}

fn alice() -> User {
    User {
        id: 1,
        email: "alice@example.com".to_string(),
        age: 30,
    }
}

#[tokio::test]
async fn registers_new_user() {
    let db = Database::default();
    let id = register(&db, alice()).run().await;

    assert_eq!(id, Ok(1));
    assert_eq!(db.find(1), Some(alice()));
}

#[tokio::test]
async fn rejects_underage_user() {
    let db = Database::default();
    let young = User {
        age: 15,
        ..alice()
    };

    assert_left!(register(&db, young).safe_run().await, AppError::AgeTooYoung);
    assert_eq!(db.find(1), None);
}

#[tokio::test]
async fn rejects_duplicate_email() {
    let db = Database::default();
    db.insert(alice());
    let twin = User { id: 2, ..alice() };

    assert_left!(
        register(&db, twin).safe_run().await,
        AppError::EmailExists("alice@example.com".to_string())
    );
    assert_eq!(db.find(2), None);
}

#[tokio::test]
async fn registration_is_replayed_on_each_run() {
    let db = Database::default();
    let effect = register(&db, alice());

    assert_eq!(effect.run().await, Ok(1));
    assert_left!(
        effect.safe_run().await,
        AppError::EmailExists("alice@example.com".to_string())
    );
}

#[tokio::test]
async fn fetch_then_translate_errors() {
    let db = Database::default();
    db.insert(alice());

    assert_right!(to_http(fetch_user(&db, 1)).safe_run().await, alice());
    assert_left!(
        to_http(fetch_user(&db, 9)).safe_run().await,
        HttpError::Status(404, "user 9 not found".to_string())
    );
}

#[tokio::test]
async fn unexpected_panic_becomes_internal_error() {
    let effect = EitherIO::<AppError, User>::from_fn(app_failure(), || panic!("pool exhausted"));

    assert_left!(
        effect.safe_run().await,
        AppError::Unexpected("panicked: pool exhausted".to_string())
    );
    assert_left!(to_http(effect).safe_run().await, HttpError::Internal);
}

#[tokio::test]
async fn recover_from_missing_user_with_guest() {
    let db = Database::default();
    let guest = User {
        id: 0,
        email: "guest@example.com".to_string(),
        age: 18,
    };
    let fallback = guest.clone();

    let effect = fetch_user(&db, 42).catch(move |error| match error {
        AppError::NotFound(_) => Either::right(fallback.clone()),
        other => Either::left(other),
    });

    assert_eq!(effect.run().await, Ok(guest));
}

#[tokio::test]
async fn combine_two_lookups() {
    let db = Database::default();
    db.insert(alice());
    db.insert(User {
        id: 2,
        email: "bob@example.com".to_string(),
        age: 40,
    });

    let total_age = fetch_user(&db, 1).zip(fetch_user(&db, 2), |a, b| {
        u32::from(a.age) + u32::from(b.age)
    });
    assert_eq!(total_age.run().await, Ok(70));

    let missing = fetch_user(&db, 1).zip(fetch_user(&db, 3), |a, b| a.id + b.id);
    assert_eq!(missing.run().await, Err(AppError::NotFound(3)));
}

#[tokio::test]
async fn fallible_async_source() {
    let effect = EitherIO::attempt(app_failure(), || async {
        tokio::task::yield_now().await;
        "8080".parse::<u16>()
    })
    .map(|port| format!("listening on {}", port));

    assert_eq!(effect.run().await, Ok("listening on 8080".to_string()));

    let broken = EitherIO::attempt(app_failure(), || async { "80a".parse::<u16>() });
    assert_eq!(
        broken.run().await,
        Err(AppError::Unexpected("invalid digit found in string".to_string()))
    );
}

#[tokio::test]
async fn audit_failures_without_changing_them() {
    let audit = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&audit);
    let db = Database::default();

    let effect = fetch_user(&db, 5)
        .tap_left(move |error| log.lock().unwrap().push(format!("{:?}", error)));

    assert_eq!(effect.run().await, Err(AppError::NotFound(5)));
    assert_eq!(*audit.lock().unwrap(), vec!["NotFound(5)".to_string()]);
}

#[test]
fn runs_without_an_async_runtime() {
    let db = Database::default();
    db.insert(alice());

    let email = fetch_user(&db, 1).map(|user| user.email);
    assert_eq!(email.run_blocking(), Ok("alice@example.com".to_string()));
}
