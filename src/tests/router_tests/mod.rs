mod dashboard_tests;
