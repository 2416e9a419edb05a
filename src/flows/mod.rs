//! Screen-level operations.
//!
//! Each method here is the submit action of one screen: client-side
//! validation, then the remote call or calls, then a single success or
//! failure outcome. Navigation and rendering stay with the caller.
//!
//! Every flow runs under an at-most-one-in-flight gate: a submit that
//! arrives while the previous one is still pending fails fast with
//! [`FlowError::Busy`] instead of issuing a duplicate remote call.


use crate::auth::{AuthError, AuthGateway};
use crate::device::{CredentialStore, DeviceError, RememberedCredentials};
use crate::favorites::models::FavoriteTea;
use crate::favorites::{FavoriteError, FavoriteStore};
use crate::media::{MediaClient, MediaError};
use crate::orders::models::{Order, OrderRequest, PaymentMethod};
use crate::orders::{OrderError, OrderRecorder};
use crate::products::models::{NewProduct, Product};
use crate::products::{ProductError, ProductStore};
use crate::session::{Session, SessionHandle};
use crate::users::models::{UserProfile, UserUpdate};
use crate::users::{UserError, UserStore};
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Error, Debug)]
pub enum FlowError {
    /// A previous submit of the same operation has not resolved yet.
    #[error("Please wait, the previous request is still being processed.")]
    Busy,
    /// Rejected by client-side validation; no remote call was made.
    #[error("{0}")]
    Invalid(String),
    #[error("Please sign in first.")]
    NotSignedIn,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Favorite(#[from] FavoriteError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// One lock per submit action. The gates live on the app facade so every
/// `Flows` handle shares them.
#[derive(Default)]
pub(crate) struct Gates {
    sign_in: Mutex<()>,
    sign_up: Mutex<()>,
    reset_password: Mutex<()>,
    product: Mutex<()>,
    checkout: Mutex<()>,
    favorite: Mutex<()>,
    preferences: Mutex<()>,
    profile: Mutex<()>,
}

fn begin(gate: &Mutex<()>) -> Result<MutexGuard<'_, ()>, FlowError> {
    gate.try_lock().map_err(|_| FlowError::Busy)
}

pub struct Flows {
    auth: AuthGateway,
    users: UserStore,
    products: ProductStore,
    orders: OrderRecorder,
    favorites: FavoriteStore,
    media: MediaClient,
    credentials: CredentialStore,
    session: SessionHandle,
    gates: Arc<Gates>,
}

impl Flows {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        auth: AuthGateway,
        users: UserStore,
        products: ProductStore,
        orders: OrderRecorder,
        favorites: FavoriteStore,
        media: MediaClient,
        credentials: CredentialStore,
        session: SessionHandle,
        gates: Arc<Gates>,
    ) -> Self {
        Self {
            auth,
            users,
            products,
            orders,
            favorites,
            media,
            credentials,
            session,
            gates,
        }
    }

    /// Login screen: sign in and honor the remember-me checkbox.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<Session, FlowError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(FlowError::Invalid("Please fill all fields".to_string()));
        }

        let _permit = begin(&self.gates.sign_in)?;
        let session = self.auth.login(email, password).await?;

        if remember {
            self.credentials.set(&RememberedCredentials {
                email: email.to_string(),
                password: password.to_string(),
            })?;
        } else {
            self.credentials.clear()?;
        }

        Ok(session)
    }

    /// Registration screen: create the account, then its profile record.
    ///
    /// If the profile write fails the account still exists; the error is
    /// surfaced and the caller may retry the profile separately.
    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session, FlowError> {
        if full_name.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(FlowError::Invalid("Please fill all fields".to_string()));
        }
        if password != confirm_password {
            return Err(FlowError::Invalid("Passwords do not match.".to_string()));
        }

        let _permit = begin(&self.gates.sign_up)?;
        let session = self.auth.register(email, password).await?;

        let profile = UserProfile {
            full_name: full_name.trim().to_string(),
            email: email.to_string(),
            preferences: Vec::new(),
            photo_url: None,
        };
        self.users.create_user(&session.uid, &profile).await?;

        Ok(session)
    }

    /// Forgot-password screen. Returns the confirmation message to show.
    pub async fn reset_password(&self, email: &str) -> Result<String, FlowError> {
        if email.trim().is_empty() {
            return Err(FlowError::Invalid(
                "Please enter your email address.".to_string(),
            ));
        }

        let _permit = begin(&self.gates.reset_password)?;
        Ok(self.auth.forget_password(email).await?)
    }

    /// Add-product screen: upload the picked image, then write the record.
    pub async fn submit_product(
        &self,
        name: &str,
        description: &str,
        price: &str,
        image: Option<(Bytes, &str)>,
    ) -> Result<Product, FlowError> {
        let Some((data, mime_type)) = image else {
            return Err(FlowError::Invalid(
                "Please select an image first".to_string(),
            ));
        };
        if name.trim().is_empty() || description.trim().is_empty() || price.trim().is_empty() {
            return Err(FlowError::Invalid("Please fill all fields".to_string()));
        }
        let parsed: f64 = price
            .trim()
            .parse()
            .map_err(|_| FlowError::Invalid("Please enter a valid price".to_string()))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(FlowError::Invalid("Please enter a valid price".to_string()));
        }

        let _permit = begin(&self.gates.product)?;
        let image_url = self.media.upload_image(data, mime_type).await?;

        Ok(self
            .products
            .add_product(NewProduct {
                name: name.trim().to_string(),
                price: parsed,
                description: description.trim().to_string(),
                image_url,
            })
            .await?)
    }

    /// Checkout screen: record the order for the signed-in user.
    pub async fn checkout(
        &self,
        product_name: &str,
        product_price: f64,
        product_image: &str,
        delivery_address: &str,
    ) -> Result<Order, FlowError> {
        let _permit = begin(&self.gates.checkout)?;
        Ok(self
            .orders
            .place_order(OrderRequest {
                product_name: product_name.to_string(),
                product_price,
                product_image: product_image.to_string(),
                delivery_address: delivery_address.to_string(),
                payment_method: PaymentMethod::CashOnDelivery,
            })
            .await?)
    }

    /// Favourite-tea screen.
    pub async fn save_favorite(
        &self,
        name: &str,
        tea_type: &str,
        description: &str,
    ) -> Result<(), FlowError> {
        let _permit = begin(&self.gates.favorite)?;
        Ok(self
            .favorites
            .add_favorite(FavoriteTea {
                name: name.trim().to_string(),
                tea_type: tea_type.trim().to_string(),
                description: description.trim().to_string(),
            })
            .await?)
    }

    /// Preferences screen: replace the signed-in user's tea selection.
    pub async fn save_preferences(&self, preferences: Vec<String>) -> Result<(), FlowError> {
        if preferences.is_empty() {
            return Err(FlowError::Invalid(
                "Please select at least one tea.".to_string(),
            ));
        }
        let uid = self.session.uid().ok_or(FlowError::NotSignedIn)?;

        let _permit = begin(&self.gates.preferences)?;
        Ok(self
            .users
            .update_user(
                &uid,
                &UserUpdate {
                    preferences: Some(preferences),
                    ..Default::default()
                },
            )
            .await?)
    }

    /// Profile-edit screen: sparse update of name and email.
    pub async fn update_profile(&self, full_name: &str, email: &str) -> Result<(), FlowError> {
        if full_name.trim().is_empty() || email.trim().is_empty() {
            return Err(FlowError::Invalid("Please fill all fields".to_string()));
        }
        let uid = self.session.uid().ok_or(FlowError::NotSignedIn)?;

        let _permit = begin(&self.gates.profile)?;
        Ok(self
            .users
            .update_user(
                &uid,
                &UserUpdate {
                    full_name: Some(full_name.trim().to_string()),
                    email: Some(email.to_string()),
                    ..Default::default()
                },
            )
            .await?)
    }
}
