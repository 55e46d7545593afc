use crate::endpoint::endpoint_group;

endpoint_group! {
    /// Customer accounts.
    pub struct Clients;
    table CLIENT_ENDPOINTS;

    /// Create an individual client, optionally with a deposit account.
    fn create_individual_client => POST "/clients",
        body [
            "officeId",
            "firstname",
            "lastname",
            "middlename",
            "externalId",
            "_isActive",
            "clientType",
            "createdDate",
            "mobileNo",
            "emailAddress",
            "_isAddressEnabled",
            "tierLevel",
            "country",
            "street",
            "city",
            "createDepositAccount",
            "productId",
        ];
    /// Activate a pending client.
    fn activate_client => POST "/clients/{clientId}/activate",
        body ["activationDate"];
    /// Move a client to another tier.
    fn change_client_tier => POST "/clients/{clientId}/updateTier",
        body ["tierRank"];
    /// List clients.
    fn retrieve_customers, pages retrieve_customer_pages => GET "/clients",
        query ["perPage", "page"];
    /// Retrieve a single client.
    fn retrieve_client => GET "/clients/{clientId}";
    /// List the accounts held by a client.
    fn list_customers_accounts => GET "/clients/{clientId}/accounts";
}
