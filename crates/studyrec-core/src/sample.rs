//! Built-in study catalog, used when no catalog file is configured.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::types::MaterialRecord;

pub fn sample_records() -> Vec<MaterialRecord> {
    vec![
        MaterialRecord::new(1, "Introduction to Python", "Concepts of Python programming", "Programming", "python,basics"),
        MaterialRecord::new(2, "ML with scikit-learn", "ML methods description", "ML", "ml,scikit"),
        MaterialRecord::new(3, "NLP Text Processing", "Text data processing", "NLP", "nlp,text"),
        MaterialRecord::new(4, "Pandas Analysis", "Data analysis tools", "Data", "pandas,data-analysis"),
        MaterialRecord::new(5, "Data Visualization", "Charts and diagrams", "Data", "matplotlib,visualization"),
        MaterialRecord::new(6, "Deep Learning Basics", "Neural networks", "ML", "deep-learning,neural-networks"),
        MaterialRecord::new(7, "Recommendation Systems", "Recommendation systems", "ML", "recommendation-systems"),
        MaterialRecord::new(8, "Python for Data Science", "Data analysis tools", "Programming", "python,data-science"),
        MaterialRecord::new(9, "C++ Programming", "C++ language concepts", "Programming", "c++,programming"),
        MaterialRecord::new(10, "Time Series Analysis", "Forecasting methods", "Data", "time-series,forecasting"),
    ]
}

pub fn sample_catalog() -> Result<Catalog> { Catalog::new(sample_records()) }
