mod period_classifier;

pub use period_classifier::PeriodClassifier;
