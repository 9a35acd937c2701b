pub mod dividends;
