pub mod cloudfront;
pub mod dry_run;
