use crate::endpoint::endpoint_group;

endpoint_group! {
    /// Savings, loan and fixed deposit product catalogs.
    pub struct Products;
    table PRODUCT_ENDPOINTS;

    /// List deposit products.
    fn list_savings_products, pages list_savings_product_pages => GET "/savingsproducts";
    /// Retrieve one deposit product.
    fn retrieve_savings_product => GET "/savingsproducts/{productId}";
    /// List loan products.
    fn list_loan_products, pages list_loan_product_pages => GET "/loanproducts";
    /// Retrieve one loan product.
    fn retrieve_loan_product => GET "/loanproducts/{loanProductId}";
    /// List fixed deposit products.
    fn list_fixed_deposit_products, pages list_fixed_deposit_product_pages => GET "/fixeddepositproducts";
    /// Retrieve one fixed deposit product.
    fn retrieve_fixed_deposit_product => GET "/fixeddepositproducts/{productId}";
}
