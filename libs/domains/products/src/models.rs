use axum_helpers::{PageQuery, SortOrder};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError};

use crate::entity::product;
use crate::error::{ProductError, ProductResult};

fn validate_not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("nil_uuid"));
    }
    Ok(())
}

fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    if urls.iter().all(|url| url.validate_url()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_image_url"))
    }
}

/// Stock state of a variant
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VariantStatus {
    #[default]
    #[sea_orm(string_value = "ready")]
    Ready,
    #[sea_orm(string_value = "out_of_stock")]
    OutOfStock,
    #[sea_orm(string_value = "limited")]
    Limited,
}

/// Columns a product listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProductSortField {
    #[default]
    ProductId,
    ProductName,
    BrandId,
    UserId,
    CreatedAt,
    UpdatedAt,
}

impl ProductSortField {
    pub(crate) fn column(self) -> product::Column {
        match self {
            ProductSortField::ProductId => product::Column::ProductId,
            ProductSortField::ProductName => product::Column::ProductName,
            ProductSortField::BrandId => product::Column::BrandId,
            ProductSortField::UserId => product::Column::UserId,
            ProductSortField::CreatedAt => product::Column::CreatedAt,
            ProductSortField::UpdatedAt => product::Column::UpdatedAt,
        }
    }
}

/// A resolved page request: known column, direction, bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductListQuery {
    pub field: ProductSortField,
    pub sort: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

impl TryFrom<&PageQuery> for ProductListQuery {
    type Error = ProductError;

    fn try_from(page: &PageQuery) -> ProductResult<Self> {
        page.validate()?;

        let field = match page.field() {
            Some(raw) => raw
                .parse()
                .map_err(|_| ProductError::Validation(format!("unknown sort field '{raw}'")))?,
            None => ProductSortField::default(),
        };

        Ok(Self {
            field,
            sort: page.sort,
            limit: page.limit,
            offset: page.offset(),
        })
    }
}

/// Product record
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub brand_id: Uuid,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    /// Optimistic concurrency token, bumped on every update
    pub version: i32,
}

impl Product {
    pub fn from_payload(payload: PayloadProduct) -> Self {
        Self {
            product_id: Uuid::new_v4(),
            user_id: payload.user_id,
            brand_id: payload.brand_id,
            product_name: payload.product_name,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
            created_by: payload.user_id,
            updated_by: None,
            deleted_by: None,
            version: 1,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some() && self.deleted_by.is_some()
    }

    pub fn soft_delete(&mut self, by: Uuid) -> ProductResult<()> {
        if self.is_deleted() {
            return Err(ProductError::Conflict(format!(
                "Product {} is already deleted",
                self.product_id
            )));
        }

        let now = Utc::now();
        self.deleted_at = Some(now);
        self.deleted_by = Some(by);
        self.updated_at = Some(now);
        self.updated_by = Some(by);
        Ok(())
    }

    pub fn apply_update(&mut self, payload: PayloadProduct) -> ProductResult<()> {
        payload.validate()?;

        self.product_name = payload.product_name;
        self.brand_id = payload.brand_id;
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(payload.user_id);
        Ok(())
    }
}

/// Variant record; `images` is filled on create and on aggregate reads
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub variant_name: String,
    pub price: f64,
    pub status: VariantStatus,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    pub images: Vec<Image>,
}

impl Variant {
    /// New variant for `product_id`; image positions follow the payload order.
    pub fn from_payload(payload: PayloadVariant, product_id: Uuid, actor: Uuid) -> Self {
        let variant_id = Uuid::new_v4();
        let created_at = Utc::now();

        let images = payload
            .images
            .into_iter()
            .zip(0..)
            .map(|(url, position)| Image {
                image_id: Uuid::new_v4(),
                variant_id,
                image_url: url,
                position,
                created_at,
                updated_at: None,
                created_by: actor,
                updated_by: None,
            })
            .collect();

        Self {
            variant_id,
            product_id,
            variant_name: payload.variant_name,
            price: payload.price,
            status: payload.status.unwrap_or_default(),
            quantity: payload.quantity,
            created_at,
            updated_at: None,
            deleted_at: None,
            created_by: actor,
            updated_by: None,
            deleted_by: None,
            images,
        }
    }
}

/// Image record
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub image_id: Uuid,
    pub variant_id: Uuid,
    pub image_url: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
}

/// A new product with its first variant; only exists on the create path
#[derive(Debug, Clone, PartialEq)]
pub struct ProductAndVariant {
    pub product: Product,
    pub variant: Variant,
}

impl ProductAndVariant {
    pub fn from_payload(payload: PayloadProductAndVariant) -> Self {
        let product = Product::from_payload(PayloadProduct {
            user_id: payload.user_id,
            brand_id: payload.brand_id,
            product_name: payload.product_name,
        });
        let variant = Variant::from_payload(payload.variant, product.product_id, product.user_id);

        Self { product, variant }
    }
}

/// A product with every variant and each variant's images
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithVariants {
    pub product: Product,
    pub variants: Vec<Variant>,
}

/// Body for update, soft delete and hard delete; `userId` is the acting user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayloadProduct {
    #[validate(custom(function = "validate_not_nil"))]
    pub user_id: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub brand_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayloadVariant {
    #[validate(length(min = 1, max = 255))]
    pub variant_name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Defaults to `ready`
    #[serde(default)]
    pub status: Option<VariantStatus>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    /// Absolute image URLs, kept in this order
    #[serde(default)]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayloadProductAndVariant {
    #[validate(custom(function = "validate_not_nil"))]
    pub user_id: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub brand_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub product_name: String,
    #[validate(nested)]
    pub variant: PayloadVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub brand_id: Uuid,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            user_id: p.user_id,
            brand_id: p.brand_id,
            product_name: p.product_name,
            created_at: p.created_at,
            updated_at: p.updated_at,
            deleted_at: p.deleted_at,
            created_by: p.created_by,
            updated_by: p.updated_by,
            deleted_by: p.deleted_by,
        }
    }
}

/// Variant projection; images are reduced to their URLs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponse {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub variant_name: String,
    pub price: f64,
    pub status: VariantStatus,
    pub quantity: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
}

impl From<Variant> for VariantResponse {
    fn from(v: Variant) -> Self {
        Self {
            variant_id: v.variant_id,
            product_id: v.product_id,
            variant_name: v.variant_name,
            price: v.price,
            status: v.status,
            quantity: v.quantity,
            images: v.images.into_iter().map(|i| i.image_url).collect(),
            created_at: v.created_at,
            updated_at: v.updated_at,
            deleted_at: v.deleted_at,
            created_by: v.created_by,
            updated_by: v.updated_by,
            deleted_by: v.deleted_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductAndVariantResponse {
    pub product: ProductResponse,
    pub variant: VariantResponse,
}

impl From<ProductAndVariant> for ProductAndVariantResponse {
    fn from(pv: ProductAndVariant) -> Self {
        Self {
            product: pv.product.into(),
            variant: pv.variant.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductWithVariantsResponse {
    pub product: ProductResponse,
    pub variants: Vec<VariantResponse>,
}

impl From<ProductWithVariants> for ProductWithVariantsResponse {
    fn from(pv: ProductWithVariants) -> Self {
        Self {
            product: pv.product.into(),
            variants: pv.variants.into_iter().map(Into::into).collect(),
        }
    }
}
