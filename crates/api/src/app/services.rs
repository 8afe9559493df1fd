//! In-memory service layer: accounts, customers, products, orders.
//!
//! Single-process storage behind [`Store`]; a relational backend would slot
//! in behind the same methods.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crm_auth::{Hs256JwtValidator, Role, SessionClaims, TokenError};
use crm_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId, UserId};
use crm_customers::{ContactInfo, Customer};
use crm_orders::{Order, OrderStats, OrderStatus};
use crm_products::{Product, ProductCategory};

use super::store::{InMemoryStore, Store};

const SESSION_TTL_MINUTES: i64 = 60;

/// A registered login account.
///
/// Self-registered accounts get the `customer` role and a linked customer
/// record; staff accounts are expected to arrive via externally minted
/// tokens rather than this store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub roles: Vec<Role>,
    pub is_superuser: bool,
    pub customer_id: Option<CustomerId>,
}

pub struct AppServices {
    jwt: Arc<Hs256JwtValidator>,
    users: InMemoryStore<UserId, UserRecord>,
    usernames: InMemoryStore<String, UserId>,
    customers: InMemoryStore<CustomerId, Customer>,
    products: InMemoryStore<ProductId, Product>,
    orders: InMemoryStore<OrderId, Order>,
}

impl AppServices {
    pub fn new(jwt: Arc<Hs256JwtValidator>) -> Self {
        Self {
            jwt,
            users: InMemoryStore::new(),
            usernames: InMemoryStore::new(),
            customers: InMemoryStore::new(),
            products: InMemoryStore::new(),
            orders: InMemoryStore::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Accounts
    // ---------------------------------------------------------------------

    /// Register a new account with the `customer` role and a linked customer
    /// record named after the account.
    pub fn register_account(
        &self,
        username: &str,
        contact: Option<ContactInfo>,
    ) -> DomainResult<UserRecord> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }

        let user_id = UserId::new();
        let customer_id = CustomerId::new();
        let customer = Customer::register(
            customer_id,
            Some(user_id),
            username,
            contact,
            Utc::now(),
        )?;

        // The username index is the uniqueness authority: reserving the name
        // is a single atomic step, so two concurrent registrations of the
        // same name cannot both succeed.
        if !self
            .usernames
            .insert_if_absent(username.to_string(), user_id)
        {
            return Err(DomainError::conflict("username already taken"));
        }

        let user = UserRecord {
            id: user_id,
            username: username.to_string(),
            roles: vec![Role::CUSTOMER],
            is_superuser: false,
            customer_id: Some(customer_id),
        };

        self.customers.upsert(customer_id, customer);
        self.users.upsert(user_id, user.clone());

        tracing::info!(user_id = %user_id, username, "account registered");
        Ok(user)
    }

    /// Mint a session token for the given account.
    pub fn issue_session(&self, user: &UserRecord) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id,
            roles: user.roles.clone(),
            is_superuser: user.is_superuser,
            issued_at: now,
            expires_at: now + Duration::minutes(SESSION_TTL_MINUTES),
        };
        self.jwt.issue(&claims)
    }

    // ---------------------------------------------------------------------
    // Customers
    // ---------------------------------------------------------------------

    pub fn customers_list(&self) -> Vec<Customer> {
        let mut customers = self.customers.list();
        customers.sort_by_key(|c| (c.created_at(), c.id()));
        customers
    }

    pub fn customer_get(&self, id: CustomerId) -> Option<Customer> {
        self.customers.get(&id)
    }

    /// The customer record linked to a login account, if any.
    pub fn customer_for_user(&self, user_id: UserId) -> Option<Customer> {
        self.customers
            .list()
            .into_iter()
            .find(|c| c.user_id() == Some(user_id))
    }

    pub fn customer_update(
        &self,
        id: CustomerId,
        name: Option<String>,
        contact: Option<ContactInfo>,
    ) -> DomainResult<Customer> {
        let mut customer = self.customers.get(&id).ok_or(DomainError::NotFound)?;
        customer.update_details(name, contact)?;
        self.customers.upsert(id, customer.clone());
        Ok(customer)
    }

    /// Delete a customer; surviving orders keep their other fields but lose
    /// the customer reference.
    pub fn customer_delete(&self, id: CustomerId) -> DomainResult<()> {
        let customer = self.customers.remove(&id).ok_or(DomainError::NotFound)?;

        for mut order in self.orders.list() {
            if order.customer_id() == Some(id) {
                order.clear_customer();
                self.orders.upsert(order.id(), order);
            }
        }

        if let Some(user_id) = customer.user_id() {
            if let Some(mut user) = self.users.get(&user_id) {
                user.customer_id = None;
                self.users.upsert(user_id, user);
            }
        }

        tracing::info!(customer_id = %id, "customer deleted");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Products
    // ---------------------------------------------------------------------

    pub fn product_create(
        &self,
        name: &str,
        price: u64,
        category: ProductCategory,
        description: Option<String>,
        tags: Vec<String>,
    ) -> DomainResult<Product> {
        let product = Product::create(
            ProductId::new(),
            name,
            price,
            category,
            description,
            tags,
            Utc::now(),
        )?;
        self.products.upsert(product.id(), product.clone());
        Ok(product)
    }

    pub fn products_list(&self) -> Vec<Product> {
        let mut products = self.products.list();
        products.sort_by_key(|p| (p.created_at(), p.id()));
        products
    }

    pub fn product_get(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id)
    }

    // ---------------------------------------------------------------------
    // Orders
    // ---------------------------------------------------------------------

    pub fn order_place(
        &self,
        customer_id: Option<CustomerId>,
        product_id: Option<ProductId>,
        status: OrderStatus,
        note: Option<String>,
    ) -> DomainResult<Order> {
        if let Some(customer_id) = customer_id {
            if self.customers.get(&customer_id).is_none() {
                return Err(DomainError::NotFound);
            }
        }
        if let Some(product_id) = product_id {
            if self.products.get(&product_id).is_none() {
                return Err(DomainError::NotFound);
            }
        }

        let order = Order::place(
            OrderId::new(),
            customer_id,
            product_id,
            status,
            note,
            Utc::now(),
        )?;
        self.orders.upsert(order.id(), order.clone());
        Ok(order)
    }

    pub fn order_get(&self, id: OrderId) -> Option<Order> {
        self.orders.get(&id)
    }

    pub fn order_update(
        &self,
        id: OrderId,
        status: Option<OrderStatus>,
        note: Option<String>,
        product_id: Option<ProductId>,
    ) -> DomainResult<Order> {
        if let Some(product_id) = product_id {
            if self.products.get(&product_id).is_none() {
                return Err(DomainError::NotFound);
            }
        }

        let mut order = self.orders.get(&id).ok_or(DomainError::NotFound)?;
        order.update(status, note, product_id)?;
        self.orders.upsert(id, order.clone());
        Ok(order)
    }

    pub fn order_delete(&self, id: OrderId) -> DomainResult<()> {
        self.orders.remove(&id).ok_or(DomainError::NotFound)?;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    pub fn orders_list(&self) -> Vec<Order> {
        let mut orders = self.orders.list();
        orders.sort_by_key(|o| (o.placed_at(), o.id()));
        orders
    }

    pub fn orders_for_customer(&self, customer_id: CustomerId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .list()
            .into_iter()
            .filter(|o| o.customer_id() == Some(customer_id))
            .collect();
        orders.sort_by_key(|o| (o.placed_at(), o.id()));
        orders
    }

    /// Dashboard view: all customers, all orders, and the order counts.
    pub fn dashboard(&self) -> (Vec<Customer>, Vec<Order>, OrderStats) {
        let customers = self.customers_list();
        let orders = self.orders_list();
        let stats = OrderStats::from_orders(&orders);
        (customers, orders, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> AppServices {
        AppServices::new(Arc::new(Hs256JwtValidator::new(b"test-secret".to_vec())))
    }

    #[test]
    fn register_account_links_customer_record_and_customer_role() {
        let svc = services();
        let user = svc.register_account("dennis", None).unwrap();

        assert_eq!(user.roles, vec![Role::CUSTOMER]);
        assert!(!user.is_superuser);

        let customer = svc.customer_for_user(user.id).unwrap();
        assert_eq!(customer.name(), "dennis");
        assert_eq!(Some(customer.id()), user.customer_id);
    }

    #[test]
    fn register_account_rejects_duplicate_username() {
        let svc = services();
        svc.register_account("dennis", None).unwrap();
        let err = svc.register_account("dennis", None).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn issued_session_round_trips_through_validator() {
        let jwt = Arc::new(Hs256JwtValidator::new(b"test-secret".to_vec()));
        let svc = AppServices::new(jwt.clone());
        let user = svc.register_account("dennis", None).unwrap();

        let token = svc.issue_session(&user).unwrap();
        let claims = crm_auth::JwtValidator::validate(&*jwt, &token, Utc::now()).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.roles, vec![Role::CUSTOMER]);
    }

    #[test]
    fn order_place_requires_existing_references() {
        let svc = services();
        let err = svc
            .order_place(Some(CustomerId::new()), None, OrderStatus::Pending, None)
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn customer_delete_detaches_orders_instead_of_deleting_them() {
        let svc = services();
        let user = svc.register_account("dennis", None).unwrap();
        let customer_id = user.customer_id.unwrap();

        let order = svc
            .order_place(Some(customer_id), None, OrderStatus::Pending, None)
            .unwrap();

        svc.customer_delete(customer_id).unwrap();

        assert!(svc.customer_get(customer_id).is_none());
        let survivor = svc.order_get(order.id()).unwrap();
        assert_eq!(survivor.customer_id(), None);
        assert_eq!(survivor.status(), OrderStatus::Pending);
    }

    #[test]
    fn dashboard_counts_match_order_statuses() {
        let svc = services();
        svc.order_place(None, None, OrderStatus::Pending, None).unwrap();
        svc.order_place(None, None, OrderStatus::Delivered, None).unwrap();
        svc.order_place(None, None, OrderStatus::OutForDelivery, None)
            .unwrap();

        let (_, orders, stats) = svc.dashboard();
        assert_eq!(orders.len(), 3);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.delivered, 1);
    }

    #[test]
    fn concurrent_registrations_of_same_username_create_one_account() {
        use std::sync::Barrier;
        use std::thread;

        let svc = Arc::new(services());
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let svc = svc.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    svc.register_account("dennis", None).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(svc.customers_list().len(), 1);
    }
}
