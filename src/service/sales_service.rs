use crate::analytics::{Aggregator, AggregatorConfig, AnalyticsReport};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metrics::{
    ANALYTICS_COMPUTE_DURATION_SECONDS, SALES_STORED, SALE_MUTATIONS_TOTAL,
    SENTIMENT_ANALYSES_TOTAL,
};
use crate::models::{CreateSaleInput, Sale, SaleId};
use crate::seed;
use crate::sentiment::{Lexicon, SentimentAnalyzer, SentimentResult};
use crate::state::{DeleteOutcome, SaleStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Default cap on sentiment input length, in characters
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;

/// Sales bookkeeping, dashboard analytics and review sentiment
///
/// Shared by the GraphQL and REST transports.
pub struct SalesService {
    store: Arc<dyn SaleStore>,
    aggregator: Aggregator,
    analyzer: SentimentAnalyzer,
    max_text_length: usize,
}

impl SalesService {
    pub fn new(store: Arc<dyn SaleStore>) -> Self {
        Self {
            store,
            aggregator: Aggregator::default(),
            analyzer: SentimentAnalyzer::new(),
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }

    /// Build a service with the analytics and sentiment settings from `config`
    /// Wire the service from configuration, loading a custom lexicon if one is set
    pub fn from_config(store: Arc<dyn SaleStore>, config: &Config) -> Result<Self> {
        let service = Self::new(store)
            .with_aggregator(Aggregator::new(AggregatorConfig::from(&config.analytics)))
            .with_max_text_length(config.sentiment.max_text_length);

        match &config.sentiment.lexicon_path {
            Some(path) => {
                let lexicon = Lexicon::from_file(path)?;
                Ok(service.with_analyzer(SentimentAnalyzer::with_lexicon(Arc::new(lexicon))))
            }
            None => Ok(service),
        }
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_analyzer(mut self, analyzer: SentimentAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    /// Get a reference to the sale store
    pub fn store(&self) -> &Arc<dyn SaleStore> {
        &self.store
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Every sale, newest first
    pub async fn list_sales(&self) -> Result<Vec<Sale>> {
        self.store.list_recent().await
    }

    pub async fn get_sale(&self, id: SaleId) -> Result<Sale> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Sale not found".to_string()))
    }

    /// Validate and store a new sale
    pub async fn create_sale(&self, input: CreateSaleInput) -> Result<Sale> {
        let new_sale = match input.validate_into() {
            Ok(sale) => sale,
            Err(e) => {
                SALE_MUTATIONS_TOTAL
                    .with_label_values(&["create", "rejected"])
                    .inc();
                tracing::debug!(error = %e, "Rejected sale input");
                return Err(e);
            }
        };

        let sale = self.store.insert(new_sale).await.map_err(|e| {
            SALE_MUTATIONS_TOTAL.with_label_values(&["create", "error"]).inc();
            e
        })?;

        SALE_MUTATIONS_TOTAL
            .with_label_values(&["create", "success"])
            .inc();
        SALES_STORED.inc();

        tracing::info!(
            sale_id = sale.id,
            product = %sale.product_name,
            category = %sale.category,
            total_amount = %sale.total_amount,
            "Sale created"
        );

        Ok(sale)
    }

    pub async fn delete_sale(&self, id: SaleId) -> Result<()> {
        match self.store.delete(id).await? {
            DeleteOutcome::Deleted => {
                SALE_MUTATIONS_TOTAL
                    .with_label_values(&["delete", "success"])
                    .inc();
                SALES_STORED.dec();
                tracing::info!(sale_id = id, "Sale deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => {
                SALE_MUTATIONS_TOTAL
                    .with_label_values(&["delete", "not_found"])
                    .inc();
                Err(AppError::NotFound("Sale not found".to_string()))
            }
        }
    }

    /// Dashboard report over every stored sale, with the trend window ending at `now`
    pub async fn analytics(&self, now: DateTime<Utc>) -> Result<AnalyticsReport> {
        let sales = self.store.list_all().await?;

        let timer = ANALYTICS_COMPUTE_DURATION_SECONDS.start_timer();
        let report = self.aggregator.compute(&sales, now);
        timer.observe_duration();

        tracing::debug!(
            sales = sales.len(),
            trend_days = report.trends.len(),
            "Analytics computed"
        );

        Ok(report)
    }

    /// Score one review text
    pub fn analyze_sentiment(&self, text: &str) -> Result<SentimentResult> {
        self.check_text(text)?;

        let result = self.analyzer.analyze(text);
        SENTIMENT_ANALYSES_TOTAL
            .with_label_values(&[&result.sentiment.to_string()])
            .inc();

        Ok(result)
    }

    /// Score several texts. Every text is checked before any is scored.
    pub fn analyze_sentiment_batch(&self, texts: &[String]) -> Result<Vec<SentimentResult>> {
        for text in texts {
            self.check_text(text)?;
        }

        let results = self.analyzer.analyze_batch(texts);
        for result in &results {
            SENTIMENT_ANALYSES_TOTAL
                .with_label_values(&[&result.sentiment.to_string()])
                .inc();
        }

        Ok(results)
    }

    /// Load the demo catalogue into an empty store. Returns how many sales were added.
    pub async fn seed_demo_data(&self) -> Result<usize> {
        let existing = self.store.count().await?;
        if existing > 0 {
            tracing::info!(existing, "Store already has sales, skipping demo data");
            SALES_STORED.set(existing as f64);
            return Ok(0);
        }

        let demo = seed::demo_sales();
        let count = demo.len();
        for sale in demo {
            self.store.insert(sale).await?;
        }

        SALES_STORED.set(count as f64);
        tracing::info!(count, "Seeded demo sales");
        Ok(count)
    }

    /// Sync the stored-sales gauge with the store
    pub async fn refresh_gauges(&self) -> Result<()> {
        SALES_STORED.set(self.store.count().await? as f64);
        Ok(())
    }

    fn check_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("Text is required".to_string()));
        }
        if text.chars().count() > self.max_text_length {
            return Err(AppError::BadRequest(format!(
                "Text is too long (max {} characters)",
                self.max_text_length
            )));
        }
        Ok(())
    }
}
