pub mod review_eligibility;
