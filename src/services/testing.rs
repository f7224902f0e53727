//! In-memory collaborators that record every call, for service tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::SellerConsole;
use crate::config::AdminProfile;
use crate::db::DocumentStore;
use crate::errors::AppError;
use crate::identity::IdentityClient;
use crate::models::{
    LoginRequest, NewProduct, Prediction, Product, RegisterRequest, SellerProfile,
};
use crate::session::{SessionCache, SlotStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateAccount(String),
    SignIn(String),
    SignOut,
    DeleteCurrentUser,
    Resume(String),
    GetSeller(String),
    SetSeller(String),
    UpdateSeller(String),
    DeleteSeller(String),
    ListProducts(String),
    AddProduct(String),
    DeleteProduct(String, String),
    AddPrediction,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

fn record(log: &CallLog, call: Call) {
    log.lock().unwrap().push(call);
}

// ==================== IDENTITY ====================

pub struct FakeIdentity {
    log: CallLog,
    // email -> (password, uid)
    accounts: Mutex<HashMap<String, (String, String)>>,
    current: Mutex<Option<String>>,
    next_uid: Mutex<u32>,
    fail_delete: Mutex<bool>,
}

impl FakeIdentity {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            next_uid: Mutex::new(1),
            fail_delete: Mutex::new(false),
        }
    }

    fn allocate_uid(&self) -> String {
        let mut next = self.next_uid.lock().unwrap();
        let uid = format!("uid-{}", *next);
        *next += 1;
        uid
    }

    /// Create an account without going through the console or the log.
    pub fn seed_account(&self, email: &str, password: &str) -> String {
        let uid = self.allocate_uid();
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), uid.clone()));
        uid
    }

    pub fn current(&self) -> Option<String> {
        self.current.lock().unwrap().clone()
    }

    pub fn has_account(&self, uid: &str) -> bool {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .any(|(_, id)| id == uid)
    }

    /// Make the next `delete_current_user` fail.
    pub fn fail_next_delete(&self) {
        *self.fail_delete.lock().unwrap() = true;
    }

    pub fn forget_current(&self) {
        self.current.lock().unwrap().take();
    }
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AppError> {
        record(&self.log, Call::CreateAccount(email.to_string()));
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(AppError::Identity("email already in use".to_string()));
        }
        Ok(self.seed_account(email, password))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AppError> {
        record(&self.log, Call::SignIn(email.to_string()));
        let uid = match self.accounts.lock().unwrap().get(email) {
            Some((stored, uid)) if stored == password => uid.clone(),
            _ => return Err(AppError::Identity("invalid credentials".to_string())),
        };
        *self.current.lock().unwrap() = Some(uid.clone());
        Ok(uid)
    }

    async fn sign_out(&self) {
        record(&self.log, Call::SignOut);
        self.forget_current();
    }

    async fn delete_current_user(&self) -> Result<(), AppError> {
        record(&self.log, Call::DeleteCurrentUser);
        if std::mem::take(&mut *self.fail_delete.lock().unwrap()) {
            return Err(AppError::Identity("requires recent login".to_string()));
        }
        let Some(uid) = self.current.lock().unwrap().take() else {
            return Err(AppError::Identity("no user signed in".to_string()));
        };
        self.accounts.lock().unwrap().retain(|_, (_, id)| *id != uid);
        Ok(())
    }

    async fn resume(&self, user_id: &str) {
        record(&self.log, Call::Resume(user_id.to_string()));
        *self.current.lock().unwrap() = Some(user_id.to_string());
    }

    async fn current_user(&self) -> Option<String> {
        self.current()
    }
}

// ==================== DOCUMENT STORE ====================

pub struct FakeStore {
    log: CallLog,
    sellers: Mutex<HashMap<String, SellerProfile>>,
    products: Mutex<HashMap<String, Vec<Product>>>,
    next_product: Mutex<u32>,
    predictions: Mutex<Vec<Prediction>>,
    failing: Mutex<Vec<&'static str>>,
}

impl FakeStore {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            sellers: Mutex::new(HashMap::new()),
            products: Mutex::new(HashMap::new()),
            next_product: Mutex::new(1),
            predictions: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }

    /// Make every later call to `operation` fail with `Persistence`.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    /// Undo an earlier [`fail`](Self::fail).
    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().retain(|op| *op != operation);
    }

    fn check(&self, operation: &'static str) -> Result<(), AppError> {
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(AppError::Persistence(format!("{} rejected", operation)));
        }
        Ok(())
    }

    pub async fn seller(&self, id: &str) -> Option<SellerProfile> {
        self.sellers.lock().unwrap().get(id).cloned()
    }

    pub fn predictions(&self) -> Vec<Prediction> {
        self.predictions.lock().unwrap().clone()
    }

    pub async fn products(&self, seller_id: &str) -> Vec<Product> {
        self.products
            .lock()
            .unwrap()
            .get(seller_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn get_seller(&self, id: &str) -> Result<Option<SellerProfile>, AppError> {
        record(&self.log, Call::GetSeller(id.to_string()));
        self.check("get_seller")?;
        Ok(self.sellers.lock().unwrap().get(id).cloned())
    }

    async fn set_seller(&self, id: &str, profile: &SellerProfile) -> Result<(), AppError> {
        record(&self.log, Call::SetSeller(id.to_string()));
        self.check("set_seller")?;
        self.sellers
            .lock()
            .unwrap()
            .insert(id.to_string(), profile.clone());
        Ok(())
    }

    async fn update_seller(&self, id: &str, profile: &SellerProfile) -> Result<(), AppError> {
        record(&self.log, Call::UpdateSeller(id.to_string()));
        self.check("update_seller")?;
        match self.sellers.lock().unwrap().get_mut(id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Seller {} not found", id))),
        }
    }

    async fn delete_seller(&self, id: &str) -> Result<(), AppError> {
        record(&self.log, Call::DeleteSeller(id.to_string()));
        self.check("delete_seller")?;
        self.sellers.lock().unwrap().remove(id);
        Ok(())
    }

    async fn list_products(&self, seller_id: &str) -> Result<Vec<Product>, AppError> {
        record(&self.log, Call::ListProducts(seller_id.to_string()));
        self.check("list_products")?;
        Ok(self.products(seller_id).await)
    }

    async fn add_product(
        &self,
        seller_id: &str,
        product: &NewProduct,
    ) -> Result<Product, AppError> {
        record(&self.log, Call::AddProduct(seller_id.to_string()));
        self.check("add_product")?;
        let id = {
            let mut next = self.next_product.lock().unwrap();
            let id = format!("prod-{}", *next);
            *next += 1;
            id
        };
        let stored = Product {
            id,
            name: product.name.clone(),
            price: product.price.clone(),
            quantity: product.quantity.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
        };
        self.products
            .lock()
            .unwrap()
            .entry(seller_id.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn delete_product(&self, seller_id: &str, product_id: &str) -> Result<(), AppError> {
        record(
            &self.log,
            Call::DeleteProduct(seller_id.to_string(), product_id.to_string()),
        );
        self.check("delete_product")?;
        let mut products = self.products.lock().unwrap();
        let list = products.entry(seller_id.to_string()).or_default();
        let before = list.len();
        list.retain(|p| p.id != product_id);
        if list.len() == before {
            return Err(AppError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }
        Ok(())
    }

    async fn add_prediction(&self, prediction: &Prediction) -> Result<String, AppError> {
        record(&self.log, Call::AddPrediction);
        self.check("add_prediction")?;
        let mut predictions = self.predictions.lock().unwrap();
        predictions.push(prediction.clone());
        Ok(format!("pred-{}", predictions.len()))
    }
}

// ==================== SESSION SLOTS ====================

/// In-process slots, lost on exit.
#[derive(Default)]
pub struct MemorySlots {
    slots: Mutex<BTreeMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().unwrap().is_empty()
    }

    /// Make every later `set` and `remove` fail.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    fn check_write(&self) -> Result<(), AppError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(AppError::Internal("slot write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SlotStore for MemorySlots {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.slots.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        self.check_write()?;
        self.slots.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.check_write()?;
        self.slots.lock().unwrap().remove(key);
        Ok(())
    }
}

// ==================== HARNESS ====================

pub struct Harness {
    pub console: SellerConsole,
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<FakeStore>,
    pub slots: Arc<MemorySlots>,
    pub admin: AdminProfile,
    log: CallLog,
}

pub fn harness() -> Harness {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let identity = Arc::new(FakeIdentity::new(log.clone()));
    let store = Arc::new(FakeStore::new(log.clone()));
    let slots = Arc::new(MemorySlots::new());
    let admin = AdminProfile {
        email: "admin@test.local".to_string(),
        ..AdminProfile::default()
    };
    Harness::assemble(identity, store, slots, admin, log)
}

impl Harness {
    fn assemble(
        identity: Arc<FakeIdentity>,
        store: Arc<FakeStore>,
        slots: Arc<MemorySlots>,
        admin: AdminProfile,
        log: CallLog,
    ) -> Self {
        let session = Arc::new(SessionCache::new(slots.clone()));
        let console = SellerConsole::new(identity.clone(), store.clone(), session, admin.clone());
        Self {
            console,
            identity,
            store,
            slots,
            admin,
            log,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Register and sign in an ordinary seller; returns its id.
    pub async fn signed_in_seller(&self) -> String {
        self.console
            .register(&RegisterRequest {
                name: "Seed Seller".into(),
                email: "seed@farm.ph".into(),
                password: "coconut".into(),
                address: "Seed Road".into(),
                contact: "0900".into(),
                farm_name: "Seed Farm".into(),
            })
            .await
            .unwrap();
        self.console
            .login(&LoginRequest {
                email: "seed@farm.ph".into(),
                password: "coconut".into(),
            })
            .await
            .unwrap()
            .data
            .id
    }

    /// Same stores and slots, fresh in-memory state, as after a process restart.
    pub fn restart(&self) -> Harness {
        self.identity.forget_current();
        Harness::assemble(
            self.identity.clone(),
            self.store.clone(),
            self.slots.clone(),
            self.admin.clone(),
            self.log.clone(),
        )
    }
}
