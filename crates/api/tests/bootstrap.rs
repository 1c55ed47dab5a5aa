mod common;

use parish_api::bootstrap::{ensure_admin, AdminSeed};
use parish_core::roles::Role;
use parish_db::repositories::UserRepo;
use sqlx::PgPool;

fn seed() -> AdminSeed {
    AdminSeed {
        email: "root@parish.test".to_string(),
        password: "first-run-password".to_string(),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_seeds_admin_on_empty_system(pool: PgPool) {
    let created = ensure_admin(&pool, &seed()).await.unwrap();
    let user = created.expect("an admin should be created");
    assert_eq!(user.role, "ADMIN");
    assert_eq!(UserRepo::count_active_with_role(&pool, Role::Admin).await.unwrap(), 1);

    // Second run is a no-op.
    assert!(ensure_admin(&pool, &seed()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_existing_admin_skips_seed(pool: PgPool) {
    common::create_user(&pool, "existing@parish.test", Role::Admin).await;
    assert!(ensure_admin(&pool, &seed()).await.unwrap().is_none());
    assert!(UserRepo::find_by_email(&pool, "root@parish.test")
        .await
        .unwrap()
        .is_none());
}
